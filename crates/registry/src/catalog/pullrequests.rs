use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{
    COMMENT_FIELDS, COMMIT_ITEM, DIFFSTAT_ITEM, Q, REPO_SLUG, SORT, STATUS_FIELDS, USER_REF, WORKSPACE, collection,
    scalar,
};

const PULL_REQUEST_ID: ParamSpec = ParamSpec::path_int("pull_request_id");
const AT_PULL_REQUEST: &[ParamSpec] = &[WORKSPACE, REPO_SLUG, PULL_REQUEST_ID];
const AT_PULL_REQUEST_FILTERED: &[ParamSpec] = &[WORKSPACE, REPO_SLUG, PULL_REQUEST_ID, Q, SORT];

const PARTICIPANT_ITEM: &[FieldSpec] = &[
    FieldSpec::string("role"),
    FieldSpec::bool("approved"),
    FieldSpec::string("state"),
    FieldSpec::string("participated_on"),
    FieldSpec::object("user", USER_REF),
];

const PULL_REQUEST_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("title"),
    FieldSpec::string("description"),
    FieldSpec::string("state"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::integer("comment_count"),
    FieldSpec::integer("task_count"),
    FieldSpec::bool("close_source_branch"),
    FieldSpec::string("reason"),
    FieldSpec::string("source_branch").from("source.branch.name"),
    FieldSpec::string("source_commit").from("source.commit.hash"),
    FieldSpec::string("source_repository").from("source.repository.full_name"),
    FieldSpec::string("destination_branch").from("destination.branch.name"),
    FieldSpec::string("destination_commit").from("destination.commit.hash"),
    FieldSpec::string("merge_commit").from("merge_commit.hash"),
    FieldSpec::object("author", USER_REF),
    FieldSpec::list("reviewers", USER_REF),
    FieldSpec::list("participants", PARTICIPANT_ITEM),
    FieldSpec::map("links"),
];

const TASK_ITEM: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("state"),
    FieldSpec::map("content"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::string("resolved_on"),
    FieldSpec::bool("pending"),
    FieldSpec::object("creator", USER_REF),
    FieldSpec::integer("comment_id").from("comment.id"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_pull_requests",
        "Pull requests of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests",
        &[WORKSPACE, REPO_SLUG, Q, SORT, ParamSpec::query("state")],
        "pull_requests",
        PULL_REQUEST_FIELDS,
        "{workspace}/{repo_slug}/pullrequests",
    ),
    scalar(
        "bitbucket_pull_request",
        "A single pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}",
        AT_PULL_REQUEST,
        PULL_REQUEST_FIELDS,
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}",
    ),
    collection(
        "bitbucket_pull_request_comments",
        "Comments on a pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/comments",
        AT_PULL_REQUEST_FILTERED,
        "comments",
        COMMENT_FIELDS,
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}/comments",
    ),
    collection(
        "bitbucket_pull_request_commits",
        "Commits a pull request would merge",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/commits",
        AT_PULL_REQUEST,
        "commits",
        COMMIT_ITEM,
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}/commits",
    ),
    collection(
        "bitbucket_pull_request_activity",
        "Activity log of a pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/activity",
        AT_PULL_REQUEST,
        "activity",
        &[
            FieldSpec::map("update"),
            FieldSpec::map("approval"),
            FieldSpec::map("comment"),
            FieldSpec::map("changes_requested"),
        ],
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}/activity",
    ),
    collection(
        "bitbucket_pull_request_statuses",
        "Build statuses of a pull request's source commit",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/statuses",
        AT_PULL_REQUEST_FILTERED,
        "statuses",
        STATUS_FIELDS,
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}/statuses",
    ),
    collection(
        "bitbucket_pull_request_tasks",
        "Tasks raised on a pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/tasks",
        AT_PULL_REQUEST_FILTERED,
        "tasks",
        TASK_ITEM,
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}/tasks",
    ),
    collection(
        "bitbucket_pull_request_diffstat",
        "Per-file change counts of a pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/diffstat",
        AT_PULL_REQUEST,
        "diffstats",
        DIFFSTAT_ITEM,
        "{workspace}/{repo_slug}/pullrequests/{pull_request_id}/diffstat",
    ),
];
