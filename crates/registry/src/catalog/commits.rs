use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{
    COMMENT_FIELDS, COMMIT_ITEM, DIFFSTAT_ITEM, Q, REPO_SLUG, SORT, STATUS_FIELDS, WORKSPACE, collection, scalar,
};

const COMMIT: ParamSpec = ParamSpec::path("commit");
const AT_COMMIT: &[ParamSpec] = &[WORKSPACE, REPO_SLUG, COMMIT];

const COMMIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("hash").required(),
    FieldSpec::string("date"),
    FieldSpec::string("message"),
    FieldSpec::string("author_raw").from("author.raw"),
    FieldSpec::map("author"),
    FieldSpec::list("parents", &[FieldSpec::string("hash")]),
    FieldSpec::map("summary"),
    FieldSpec::map("links"),
];

const REPORT_ITEM: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("title"),
    FieldSpec::string("details"),
    FieldSpec::string("external_id"),
    FieldSpec::string("reporter"),
    FieldSpec::string("link"),
    FieldSpec::string("report_type"),
    FieldSpec::string("result"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    scalar(
        "bitbucket_commit",
        "A single commit",
        "2.0/repositories/{workspace}/{repo_slug}/commit/{commit}",
        AT_COMMIT,
        COMMIT_FIELDS,
        "{workspace}/{repo_slug}/commit/{commit}",
    ),
    collection(
        "bitbucket_commits",
        "Commits of a repository, newest first",
        "2.0/repositories/{workspace}/{repo_slug}/commits",
        &[
            WORKSPACE,
            REPO_SLUG,
            ParamSpec::query("include"),
            ParamSpec::query("exclude"),
            ParamSpec::query("path"),
        ],
        "commits",
        COMMIT_ITEM,
        "{workspace}/{repo_slug}/commits",
    ),
    collection(
        "bitbucket_commit_comments",
        "Comments on a commit",
        "2.0/repositories/{workspace}/{repo_slug}/commits/{commit}/comments",
        &[WORKSPACE, REPO_SLUG, COMMIT, Q, SORT],
        "comments",
        COMMENT_FIELDS,
        "{workspace}/{repo_slug}/commits/{commit}/comments",
    ),
    scalar(
        "bitbucket_commit_comment",
        "A single comment on a commit",
        "2.0/repositories/{workspace}/{repo_slug}/commit/{commit}/comments/{comment_id}",
        &[WORKSPACE, REPO_SLUG, COMMIT, ParamSpec::path_int("comment_id")],
        COMMENT_FIELDS,
        "{workspace}/{repo_slug}/commit/{commit}/comments/{comment_id}",
    ),
    collection(
        "bitbucket_commit_statuses",
        "Build statuses reported against a commit",
        "2.0/repositories/{workspace}/{repo_slug}/commit/{commit}/statuses",
        &[WORKSPACE, REPO_SLUG, COMMIT, Q, SORT, ParamSpec::query("refname")],
        "statuses",
        STATUS_FIELDS,
        "{workspace}/{repo_slug}/commit/{commit}/statuses",
    ),
    scalar(
        "bitbucket_commit_status",
        "A single build status of a commit",
        "2.0/repositories/{workspace}/{repo_slug}/commit/{commit}/statuses/build/{key}",
        &[WORKSPACE, REPO_SLUG, COMMIT, ParamSpec::path("key")],
        STATUS_FIELDS,
        "{workspace}/{repo_slug}/commit/{commit}/statuses/build/{key}",
    ),
    collection(
        "bitbucket_commit_reports",
        "Code insight reports attached to a commit",
        "2.0/repositories/{workspace}/{repo_slug}/commit/{commit}/reports",
        AT_COMMIT,
        "reports",
        REPORT_ITEM,
        "{workspace}/{repo_slug}/commit/{commit}/reports",
    ),
    scalar(
        "bitbucket_merge_base",
        "Best common ancestor of two commits",
        "2.0/repositories/{workspace}/{repo_slug}/merge-base/{revspec}",
        &[WORKSPACE, REPO_SLUG, ParamSpec::path("revspec")],
        COMMIT_FIELDS,
        "{workspace}/{repo_slug}/merge-base/{revspec}",
    ),
    collection(
        "bitbucket_diffstat",
        "Per-file change counts between two revisions",
        "2.0/repositories/{workspace}/{repo_slug}/diffstat/{revspec}",
        &[
            WORKSPACE,
            REPO_SLUG,
            ParamSpec::path("revspec"),
            ParamSpec::query("path"),
            ParamSpec::query("ignore_whitespace"),
        ],
        "diffstats",
        DIFFSTAT_ITEM,
        "{workspace}/{repo_slug}/diffstat/{revspec}",
    ),
];
