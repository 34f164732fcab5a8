use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{
    DEFAULT_REVIEWER_ITEM, DEPLOY_KEY_ITEM, PERMISSION_GROUP_ITEM, PERMISSION_USER_ITEM, Q, SORT, WORKSPACE,
    collection, scalar,
};

const PROJECT_KEY: ParamSpec = ParamSpec::path("project_key");
const AT_PROJECT: &[ParamSpec] = &[WORKSPACE, PROJECT_KEY];

const PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("key"),
    FieldSpec::string("name"),
    FieldSpec::string("description"),
    FieldSpec::bool("is_private"),
    FieldSpec::bool("has_publicly_visible_repos"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::string("owner_uuid").from("owner.uuid"),
    FieldSpec::map("links"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_projects",
        "Projects of a workspace",
        "2.0/workspaces/{workspace}/projects",
        &[WORKSPACE, Q, SORT],
        "projects",
        PROJECT_FIELDS,
        "{workspace}/projects",
    ),
    scalar(
        "bitbucket_project",
        "A single project",
        "2.0/workspaces/{workspace}/projects/{project_key}",
        AT_PROJECT,
        PROJECT_FIELDS,
        "{workspace}/{project_key}",
    ),
    collection(
        "bitbucket_project_default_reviewers",
        "Default reviewers inherited by a project's repositories",
        "2.0/workspaces/{workspace}/projects/{project_key}/default-reviewers",
        AT_PROJECT,
        "reviewers",
        DEFAULT_REVIEWER_ITEM,
        "{workspace}/{project_key}/default-reviewers",
    ),
    collection(
        "bitbucket_project_deploy_keys",
        "Deploy keys of a project",
        "2.0/workspaces/{workspace}/projects/{project_key}/deploy-keys",
        AT_PROJECT,
        "keys",
        DEPLOY_KEY_ITEM,
        "{workspace}/{project_key}/deploy-keys",
    ),
    collection(
        "bitbucket_project_user_permissions",
        "Explicit user permissions on a project",
        "2.0/workspaces/{workspace}/projects/{project_key}/permissions-config/users",
        AT_PROJECT,
        "permissions",
        PERMISSION_USER_ITEM,
        "{workspace}/{project_key}/permissions-config/users",
    ),
    collection(
        "bitbucket_project_group_permissions",
        "Explicit group permissions on a project",
        "2.0/workspaces/{workspace}/projects/{project_key}/permissions-config/groups",
        AT_PROJECT,
        "permissions",
        PERMISSION_GROUP_ITEM,
        "{workspace}/{project_key}/permissions-config/groups",
    ),
];
