use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{HOOK_FIELDS, Q, SORT, USER_REF, VARIABLE_ITEM, WORKSPACE, collection, scalar};

const WORKSPACE_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("slug"),
    FieldSpec::string("name"),
    FieldSpec::bool("is_private"),
    FieldSpec::string("created_on"),
    FieldSpec::map("links"),
];

const MEMBERSHIP_FIELDS: &[FieldSpec] = &[
    FieldSpec::object("user", USER_REF),
    FieldSpec::string("workspace_slug").from("workspace.slug"),
    FieldSpec::map("links"),
];

const WORKSPACE_PERMISSION_ITEM: &[FieldSpec] = &[
    FieldSpec::string("permission").required(),
    FieldSpec::object("user", USER_REF),
    FieldSpec::string("workspace_slug").from("workspace.slug"),
    FieldSpec::string("added_on"),
    FieldSpec::string("last_accessed"),
];

const REPOSITORY_PERMISSION_ITEM: &[FieldSpec] = &[
    FieldSpec::string("permission").required(),
    FieldSpec::object("user", USER_REF),
    FieldSpec::string("repository").from("repository.full_name"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_workspaces",
        "Workspaces the caller belongs to",
        "2.0/workspaces",
        &[Q, SORT, ParamSpec::query("role")],
        "workspaces",
        WORKSPACE_FIELDS,
        "workspaces",
    ),
    scalar(
        "bitbucket_workspace",
        "A single workspace",
        "2.0/workspaces/{workspace}",
        &[WORKSPACE],
        WORKSPACE_FIELDS,
        "{workspace}",
    ),
    collection(
        "bitbucket_workspace_hooks",
        "Webhooks installed on a workspace",
        "2.0/workspaces/{workspace}/hooks",
        &[WORKSPACE],
        "hooks",
        HOOK_FIELDS,
        "{workspace}/hooks",
    ),
    scalar(
        "bitbucket_workspace_hook",
        "A single workspace webhook",
        "2.0/workspaces/{workspace}/hooks/{uid}",
        &[WORKSPACE, ParamSpec::path("uid")],
        HOOK_FIELDS,
        "{workspace}/hooks/{uid}",
    ),
    collection(
        "bitbucket_workspace_members",
        "Members of a workspace",
        "2.0/workspaces/{workspace}/members",
        &[WORKSPACE],
        "members",
        MEMBERSHIP_FIELDS,
        "{workspace}/members",
    ),
    scalar(
        "bitbucket_workspace_member",
        "A single workspace membership",
        "2.0/workspaces/{workspace}/members/{member}",
        &[WORKSPACE, ParamSpec::path("member")],
        MEMBERSHIP_FIELDS,
        "{workspace}/members/{member}",
    ),
    collection(
        "bitbucket_workspace_permissions",
        "Workspace-level permissions of each member",
        "2.0/workspaces/{workspace}/permissions",
        &[WORKSPACE, Q],
        "permissions",
        WORKSPACE_PERMISSION_ITEM,
        "{workspace}/permissions",
    ),
    collection(
        "bitbucket_workspace_repository_permissions",
        "Repository permissions across a workspace",
        "2.0/workspaces/{workspace}/permissions/repositories",
        &[WORKSPACE, Q, SORT],
        "permissions",
        REPOSITORY_PERMISSION_ITEM,
        "{workspace}/permissions/repositories",
    ),
    collection(
        "bitbucket_workspace_pipeline_variables",
        "Workspace-level pipeline variables",
        "2.0/workspaces/{workspace}/pipelines-config/variables",
        &[WORKSPACE],
        "variables",
        VARIABLE_ITEM,
        "{workspace}/pipelines-config/variables",
    ),
];
