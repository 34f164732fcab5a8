use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{REPO_FILTERED, REPO_SLUG, WORKSPACE, collection, scalar};

const REF_ITEM: &[FieldSpec] = &[
    FieldSpec::string("name").required(),
    FieldSpec::string("type"),
    FieldSpec::string("target_hash").from("target.hash"),
    FieldSpec::map("links"),
];

const BRANCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("name").required(),
    FieldSpec::string("type"),
    FieldSpec::string("target_hash").from("target.hash"),
    FieldSpec::string("target_date").from("target.date"),
    FieldSpec::string("target_message").from("target.message"),
    FieldSpec::strings("merge_strategies"),
    FieldSpec::string("default_merge_strategy"),
    FieldSpec::map("links"),
];

const TAG_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("name").required(),
    FieldSpec::string("type"),
    FieldSpec::string("target_hash").from("target.hash"),
    FieldSpec::string("message"),
    FieldSpec::string("date"),
    FieldSpec::map("tagger"),
    FieldSpec::map("links"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_repository_refs",
        "Branches and tags of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/refs",
        REPO_FILTERED,
        "refs",
        REF_ITEM,
        "{workspace}/{repo_slug}/refs",
    ),
    collection(
        "bitbucket_branches",
        "Branches of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/refs/branches",
        REPO_FILTERED,
        "branches",
        BRANCH_FIELDS,
        "{workspace}/{repo_slug}/refs/branches",
    ),
    scalar(
        "bitbucket_branch",
        "A single branch",
        "2.0/repositories/{workspace}/{repo_slug}/refs/branches/{branch_name}",
        &[WORKSPACE, REPO_SLUG, ParamSpec::path("branch_name")],
        BRANCH_FIELDS,
        "{workspace}/{repo_slug}/{branch_name}",
    ),
    collection(
        "bitbucket_tags",
        "Tags of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/refs/tags",
        REPO_FILTERED,
        "tags",
        TAG_FIELDS,
        "{workspace}/{repo_slug}/refs/tags",
    ),
    scalar(
        "bitbucket_tag",
        "A single tag",
        "2.0/repositories/{workspace}/{repo_slug}/refs/tags/{tag_name}",
        &[WORKSPACE, REPO_SLUG, ParamSpec::path("tag_name")],
        TAG_FIELDS,
        "{workspace}/{repo_slug}/{tag_name}",
    ),
];
