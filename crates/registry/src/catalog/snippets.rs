use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{COMMENT_FIELDS, USER_ITEM, USER_REF, WORKSPACE, collection, scalar};

const ENCODED_ID: ParamSpec = ParamSpec::path("encoded_id");
const AT_SNIPPET: &[ParamSpec] = &[WORKSPACE, ENCODED_ID];

const SNIPPET_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("title"),
    FieldSpec::string("scm"),
    FieldSpec::bool("is_private"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::object("owner", USER_REF),
    FieldSpec::object("creator", USER_REF),
    FieldSpec::map("files"),
    FieldSpec::map("links"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_snippets",
        "Snippets owned by a workspace",
        "2.0/snippets/{workspace}",
        &[WORKSPACE, ParamSpec::query("role")],
        "snippets",
        SNIPPET_FIELDS,
        "{workspace}/snippets",
    ),
    scalar(
        "bitbucket_snippet",
        "A single snippet",
        "2.0/snippets/{workspace}/{encoded_id}",
        AT_SNIPPET,
        SNIPPET_FIELDS,
        "{workspace}/{encoded_id}",
    ),
    collection(
        "bitbucket_snippet_comments",
        "Comments on a snippet",
        "2.0/snippets/{workspace}/{encoded_id}/comments",
        AT_SNIPPET,
        "comments",
        COMMENT_FIELDS,
        "{workspace}/{encoded_id}/comments",
    ),
    collection(
        "bitbucket_snippet_commits",
        "Revisions of a snippet",
        "2.0/snippets/{workspace}/{encoded_id}/commits",
        AT_SNIPPET,
        "commits",
        &[
            FieldSpec::string("hash").required(),
            FieldSpec::string("date"),
            FieldSpec::string("message"),
            FieldSpec::string("author_raw").from("author.raw"),
            FieldSpec::list("parents", &[FieldSpec::string("hash")]),
        ],
        "{workspace}/{encoded_id}/commits",
    ),
    collection(
        "bitbucket_snippet_watchers",
        "Accounts watching a snippet",
        "2.0/snippets/{workspace}/{encoded_id}/watchers",
        AT_SNIPPET,
        "watchers",
        USER_ITEM,
        "{workspace}/{encoded_id}/watchers",
    ),
];
