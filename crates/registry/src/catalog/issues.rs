use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{COMMENT_FIELDS, Q, REPO, REPO_FILTERED, REPO_SLUG, SORT, USER_REF, WORKSPACE, collection, scalar, summary};

const ISSUE_ID: ParamSpec = ParamSpec::path_int("issue_id");

const ISSUE_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("title"),
    FieldSpec::string("state"),
    FieldSpec::string("kind"),
    FieldSpec::string("priority"),
    FieldSpec::integer("votes"),
    FieldSpec::integer("watches"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::string("edited_on"),
    FieldSpec::map("content"),
    FieldSpec::object("reporter", USER_REF),
    FieldSpec::object("assignee", USER_REF),
    FieldSpec::string("component").from("component.name"),
    FieldSpec::string("milestone").from("milestone.name"),
    FieldSpec::string("version").from("version.name"),
    FieldSpec::map("links"),
];

const CHANGE_ITEM: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("name"),
    FieldSpec::string("created_on"),
    FieldSpec::map("changes"),
    FieldSpec::map("message"),
    FieldSpec::object("user", USER_REF),
];

const NAMED_ITEM: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("name"),
    FieldSpec::map("links"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_issues",
        "Issues of a repository's tracker",
        "2.0/repositories/{workspace}/{repo_slug}/issues",
        REPO_FILTERED,
        "issues",
        ISSUE_FIELDS,
        "{workspace}/{repo_slug}/issues",
    ),
    scalar(
        "bitbucket_issue",
        "A single issue",
        "2.0/repositories/{workspace}/{repo_slug}/issues/{issue_id}",
        &[WORKSPACE, REPO_SLUG, ISSUE_ID],
        ISSUE_FIELDS,
        "{workspace}/{repo_slug}/issues/{issue_id}",
    ),
    collection(
        "bitbucket_issue_comments",
        "Comments on an issue",
        "2.0/repositories/{workspace}/{repo_slug}/issues/{issue_id}/comments",
        &[WORKSPACE, REPO_SLUG, ISSUE_ID, Q, SORT],
        "comments",
        COMMENT_FIELDS,
        "{workspace}/{repo_slug}/issues/{issue_id}/comments",
    ),
    collection(
        "bitbucket_issue_changes",
        "Change log of an issue",
        "2.0/repositories/{workspace}/{repo_slug}/issues/{issue_id}/changes",
        &[WORKSPACE, REPO_SLUG, ISSUE_ID, Q, SORT],
        "changes",
        CHANGE_ITEM,
        "{workspace}/{repo_slug}/issues/{issue_id}/changes",
    ),
    collection(
        "bitbucket_issue_components",
        "Components defined on the issue tracker",
        "2.0/repositories/{workspace}/{repo_slug}/components",
        REPO,
        "components",
        NAMED_ITEM,
        "{workspace}/{repo_slug}/components",
    ),
    collection(
        "bitbucket_issue_milestones",
        "Milestones defined on the issue tracker",
        "2.0/repositories/{workspace}/{repo_slug}/milestones",
        REPO,
        "milestones",
        NAMED_ITEM,
        "{workspace}/{repo_slug}/milestones",
    ),
    collection(
        "bitbucket_issue_versions",
        "Versions defined on the issue tracker",
        "2.0/repositories/{workspace}/{repo_slug}/versions",
        REPO,
        "versions",
        NAMED_ITEM,
        "{workspace}/{repo_slug}/versions",
    ),
    summary(
        "bitbucket_issue_field_stats",
        "Aggregate counts of issue field values",
        "2.0/repositories/{workspace}/{repo_slug}/issues/field-stats/{field_name}",
        &[WORKSPACE, REPO_SLUG, ParamSpec::path("field_name")],
        "stats",
        "{workspace}/{repo_slug}/issues/field-stats/{field_name}",
    ),
];
