//! Static descriptors for every data source, grouped by platform area.
//!
//! Field sets shared by several areas (users, repositories, hooks,
//! comments) live here; each submodule lists the bindings of one area.

use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec, ResponseShape};

mod addons;
mod commits;
mod issues;
mod pipelines;
mod projects;
mod pullrequests;
mod refs;
mod repositories;
mod snippets;
mod users;
mod workspaces;

const GROUPS: &[&[BindingSpec]] = &[
    repositories::BINDINGS,
    refs::BINDINGS,
    commits::BINDINGS,
    pipelines::BINDINGS,
    issues::BINDINGS,
    pullrequests::BINDINGS,
    workspaces::BINDINGS,
    projects::BINDINGS,
    addons::BINDINGS,
    users::BINDINGS,
    snippets::BINDINGS,
];

/// Every built-in binding, in catalog order.
pub fn all() -> impl Iterator<Item = &'static BindingSpec> {
    GROUPS.iter().flat_map(|group| group.iter())
}

pub(crate) const WORKSPACE: ParamSpec = ParamSpec::path("workspace");
pub(crate) const REPO_SLUG: ParamSpec = ParamSpec::path("repo_slug");
/// Bitbucket query language filter
pub(crate) const Q: ParamSpec = ParamSpec::query("q");
pub(crate) const SORT: ParamSpec = ParamSpec::query("sort");

pub(crate) const REPO: &[ParamSpec] = &[WORKSPACE, REPO_SLUG];
pub(crate) const REPO_FILTERED: &[ParamSpec] = &[WORKSPACE, REPO_SLUG, Q, SORT];

pub(crate) const USER_REF: &[FieldSpec] = &[
    FieldSpec::string("display_name"),
    FieldSpec::string("uuid"),
    FieldSpec::string("account_id"),
    FieldSpec::string("nickname"),
    FieldSpec::string("type"),
];

pub(crate) const USER_ITEM: &[FieldSpec] = &[
    FieldSpec::string("display_name"),
    FieldSpec::string("uuid"),
    FieldSpec::string("account_id"),
    FieldSpec::string("nickname"),
    FieldSpec::string("type"),
    FieldSpec::map("links"),
];

pub(crate) const REPOSITORY_ITEM: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("name"),
    FieldSpec::string("full_name"),
    FieldSpec::string("slug"),
    FieldSpec::string("description"),
    FieldSpec::bool("is_private"),
    FieldSpec::string("scm"),
    FieldSpec::string("language"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::string("mainbranch_name").from("mainbranch.name"),
    FieldSpec::string("project_key").from("project.key"),
    FieldSpec::map("links"),
];

pub(crate) const HOOK_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("url"),
    FieldSpec::string("description"),
    FieldSpec::string("subject_type"),
    FieldSpec::bool("active"),
    FieldSpec::bool("skip_cert_verification"),
    FieldSpec::strings("events"),
    FieldSpec::string("created_at"),
];

pub(crate) const COMMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::map("content"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::map("user"),
    FieldSpec::bool("deleted"),
    FieldSpec::map("inline"),
    FieldSpec::integer("parent_id").from("parent.id"),
    FieldSpec::map("links"),
];

pub(crate) const COMMIT_ITEM: &[FieldSpec] = &[
    FieldSpec::string("hash").required(),
    FieldSpec::string("date"),
    FieldSpec::string("message"),
    FieldSpec::string("author_raw").from("author.raw"),
    FieldSpec::object("author_user", USER_REF).from("author.user"),
    FieldSpec::list("parents", &[FieldSpec::string("hash")]),
    FieldSpec::map("links"),
];

pub(crate) const STATUS_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid"),
    FieldSpec::string("key").required(),
    FieldSpec::string("refname"),
    FieldSpec::string("url"),
    FieldSpec::string("state"),
    FieldSpec::string("name"),
    FieldSpec::string("description"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
];

pub(crate) const DIFFSTAT_ITEM: &[FieldSpec] = &[
    FieldSpec::string("status"),
    FieldSpec::integer("lines_added"),
    FieldSpec::integer("lines_removed"),
    FieldSpec::string("old_path").from("old.path"),
    FieldSpec::string("new_path").from("new.path"),
];

pub(crate) const PERMISSION_USER_ITEM: &[FieldSpec] = &[
    FieldSpec::string("permission").required(),
    FieldSpec::object("user", USER_REF),
    FieldSpec::map("links"),
];

pub(crate) const PERMISSION_GROUP_ITEM: &[FieldSpec] = &[
    FieldSpec::string("permission").required(),
    FieldSpec::string("group_name").from("group.name"),
    FieldSpec::string("group_slug").from("group.slug"),
    FieldSpec::map("links"),
];

pub(crate) const DEPLOY_KEY_ITEM: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("key"),
    FieldSpec::string("label"),
    FieldSpec::string("comment"),
    FieldSpec::string("created_on"),
    FieldSpec::string("last_used"),
    FieldSpec::map("links"),
];

pub(crate) const DEFAULT_REVIEWER_ITEM: &[FieldSpec] = &[
    FieldSpec::string("reviewer_type"),
    FieldSpec::object("user", USER_REF),
    FieldSpec::string("type"),
];

pub(crate) const VARIABLE_ITEM: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("key"),
    FieldSpec::string("value"),
    FieldSpec::bool("secured"),
];

pub(crate) const fn collection(
    name: &'static str,
    summary: &'static str,
    path: &'static str,
    params: &'static [ParamSpec],
    attribute: &'static str,
    item: &'static [FieldSpec],
    identity: &'static str,
) -> BindingSpec {
    BindingSpec {
        name,
        summary,
        path,
        params,
        response: ResponseShape::Collection { attribute, item },
        identity,
    }
}

pub(crate) const fn scalar(
    name: &'static str,
    summary: &'static str,
    path: &'static str,
    params: &'static [ParamSpec],
    fields: &'static [FieldSpec],
    identity: &'static str,
) -> BindingSpec {
    BindingSpec {
        name,
        summary,
        path,
        params,
        response: ResponseShape::Scalar { fields },
        identity,
    }
}

pub(crate) const fn summary(
    name: &'static str,
    summary: &'static str,
    path: &'static str,
    params: &'static [ParamSpec],
    attribute: &'static str,
    identity: &'static str,
) -> BindingSpec {
    BindingSpec {
        name,
        summary,
        path,
        params,
        response: ResponseShape::Summary { attribute },
        identity,
    }
}
