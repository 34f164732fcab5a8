use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{
    DEFAULT_REVIEWER_ITEM, DEPLOY_KEY_ITEM, HOOK_FIELDS, PERMISSION_GROUP_ITEM, PERMISSION_USER_ITEM, Q, REPO,
    REPO_FILTERED, REPO_SLUG, REPOSITORY_ITEM, SORT, USER_ITEM, USER_REF, WORKSPACE, collection, scalar,
};

const REPOSITORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("name"),
    FieldSpec::string("full_name"),
    FieldSpec::string("description"),
    FieldSpec::bool("is_private"),
    FieldSpec::string("scm"),
    FieldSpec::string("language"),
    FieldSpec::integer("size"),
    FieldSpec::string("fork_policy"),
    FieldSpec::bool("has_issues"),
    FieldSpec::bool("has_wiki"),
    FieldSpec::string("website"),
    FieldSpec::string("created_on"),
    FieldSpec::string("updated_on"),
    FieldSpec::string("mainbranch_name").from("mainbranch.name"),
    FieldSpec::string("project_key").from("project.key"),
    FieldSpec::string("parent_full_name").from("parent.full_name"),
    FieldSpec::map("owner"),
    FieldSpec::map("links"),
];

const RESTRICTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("id").required(),
    FieldSpec::string("kind"),
    FieldSpec::string("pattern"),
    FieldSpec::string("branch_match_kind"),
    FieldSpec::string("branch_type"),
    FieldSpec::integer("value"),
    FieldSpec::list("users", USER_REF),
    FieldSpec::list("groups", &[FieldSpec::string("name"), FieldSpec::string("slug")]),
];

const BRANCH_TYPE: &[FieldSpec] = &[
    FieldSpec::string("kind"),
    FieldSpec::string("prefix"),
    FieldSpec::bool("enabled"),
];

const HOOK: &[ParamSpec] = &[WORKSPACE, REPO_SLUG, ParamSpec::path("uid")];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    scalar(
        "bitbucket_repository",
        "A single repository",
        "2.0/repositories/{workspace}/{repo_slug}",
        REPO,
        REPOSITORY_FIELDS,
        "{workspace}/{repo_slug}",
    ),
    collection(
        "bitbucket_repositories",
        "Repositories in a workspace",
        "2.0/repositories/{workspace}",
        &[WORKSPACE, ParamSpec::query("role"), Q, SORT],
        "repositories",
        REPOSITORY_ITEM,
        "{workspace}/repositories",
    ),
    collection(
        "bitbucket_repository_forks",
        "Forks of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/forks",
        REPO_FILTERED,
        "forks",
        REPOSITORY_ITEM,
        "{workspace}/{repo_slug}/forks",
    ),
    collection(
        "bitbucket_repository_watchers",
        "Users watching a repository",
        "2.0/repositories/{workspace}/{repo_slug}/watchers",
        REPO,
        "watchers",
        USER_ITEM,
        "{workspace}/{repo_slug}/watchers",
    ),
    collection(
        "bitbucket_repository_hooks",
        "Webhooks installed on a repository",
        "2.0/repositories/{workspace}/{repo_slug}/hooks",
        REPO,
        "hooks",
        HOOK_FIELDS,
        "{workspace}/{repo_slug}/hooks",
    ),
    scalar(
        "bitbucket_repository_hook",
        "A single repository webhook",
        "2.0/repositories/{workspace}/{repo_slug}/hooks/{uid}",
        HOOK,
        HOOK_FIELDS,
        "{workspace}/{repo_slug}/hooks/{uid}",
    ),
    collection(
        "bitbucket_repository_user_permissions",
        "Explicit user permissions on a repository",
        "2.0/repositories/{workspace}/{repo_slug}/permissions-config/users",
        REPO,
        "permissions",
        PERMISSION_USER_ITEM,
        "{workspace}/{repo_slug}/permissions-config/users",
    ),
    collection(
        "bitbucket_repository_group_permissions",
        "Explicit group permissions on a repository",
        "2.0/repositories/{workspace}/{repo_slug}/permissions-config/groups",
        REPO,
        "permissions",
        PERMISSION_GROUP_ITEM,
        "{workspace}/{repo_slug}/permissions-config/groups",
    ),
    collection(
        "bitbucket_branch_restrictions",
        "Branch restriction rules of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/branch-restrictions",
        &[WORKSPACE, REPO_SLUG, ParamSpec::query("kind"), ParamSpec::query("pattern")],
        "branch_restrictions",
        RESTRICTION_FIELDS,
        "{workspace}/{repo_slug}/branch-restrictions",
    ),
    scalar(
        "bitbucket_branch_restriction",
        "A single branch restriction rule",
        "2.0/repositories/{workspace}/{repo_slug}/branch-restrictions/{restriction_id}",
        &[WORKSPACE, REPO_SLUG, ParamSpec::path_int("restriction_id")],
        RESTRICTION_FIELDS,
        "{workspace}/{repo_slug}/branch-restrictions/{restriction_id}",
    ),
    scalar(
        "bitbucket_branching_model",
        "Branching model of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/branching-model",
        REPO,
        &[
            FieldSpec::string("development_branch").from("development.branch.name"),
            FieldSpec::string("development_name").from("development.name"),
            FieldSpec::string("production_branch").from("production.branch.name"),
            FieldSpec::string("production_name").from("production.name"),
            FieldSpec::list("branch_types", BRANCH_TYPE),
        ],
        "{workspace}/{repo_slug}/branching-model",
    ),
    collection(
        "bitbucket_default_reviewers",
        "Default reviewers of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/default-reviewers",
        REPO,
        "default_reviewers",
        USER_ITEM,
        "{workspace}/{repo_slug}/default-reviewers",
    ),
    collection(
        "bitbucket_effective_default_reviewers",
        "Default reviewers inherited from the repository and its project",
        "2.0/repositories/{workspace}/{repo_slug}/effective-default-reviewers",
        REPO,
        "default_reviewers",
        DEFAULT_REVIEWER_ITEM,
        "{workspace}/{repo_slug}/effective-default-reviewers",
    ),
    collection(
        "bitbucket_deploy_keys",
        "Deploy keys of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/deploy-keys",
        REPO,
        "deploy_keys",
        DEPLOY_KEY_ITEM,
        "{workspace}/{repo_slug}/deploy-keys",
    ),
    collection(
        "bitbucket_deployments",
        "Deployments of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/deployments",
        REPO,
        "deployments",
        &[
            FieldSpec::string("uuid").required(),
            FieldSpec::map("state"),
            FieldSpec::string("environment_uuid").from("environment.uuid"),
            FieldSpec::map("release"),
        ],
        "{workspace}/{repo_slug}/deployments",
    ),
    collection(
        "bitbucket_environments",
        "Deployment environments of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/environments",
        REPO,
        "environments",
        &[
            FieldSpec::string("uuid").required(),
            FieldSpec::string("name"),
            FieldSpec::string("slug"),
            FieldSpec::integer("rank"),
            FieldSpec::string("environment_type").from("environment_type.name"),
            FieldSpec::map("lock"),
            FieldSpec::map("restrictions"),
        ],
        "{workspace}/{repo_slug}/environments",
    ),
    collection(
        "bitbucket_downloads",
        "Download artifacts of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/downloads",
        REPO,
        "downloads",
        &[
            FieldSpec::string("name").required(),
            FieldSpec::integer("size"),
            FieldSpec::integer("downloads"),
            FieldSpec::string("created_on"),
            FieldSpec::map("user"),
            FieldSpec::map("links"),
        ],
        "{workspace}/{repo_slug}/downloads",
    ),
];
