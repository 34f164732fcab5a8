//! Stable names of the provider's mutating resources.
//!
//! Only the registration data is kept here; lifecycle semantics belong to
//! the host runtime.

use bitbucket_types::ResourceSpec;

const fn resource(name: &'static str, summary: &'static str, path: &'static str, identity: &'static str) -> ResourceSpec {
    ResourceSpec {
        name,
        summary,
        path,
        identity,
    }
}

pub(crate) const RESOURCES: &[ResourceSpec] = &[
    resource(
        "bitbucket_repository",
        "Repository",
        "2.0/repositories/{workspace}/{repo_slug}",
        "{workspace}/{repo_slug}",
    ),
    resource(
        "bitbucket_branch",
        "Branch",
        "2.0/repositories/{workspace}/{repo_slug}/refs/branches",
        "{workspace}/{repo_slug}/{name}",
    ),
    resource(
        "bitbucket_tag",
        "Tag",
        "2.0/repositories/{workspace}/{repo_slug}/refs/tags",
        "{workspace}/{repo_slug}/{name}",
    ),
    resource(
        "bitbucket_branch_restriction",
        "Branch restriction rule",
        "2.0/repositories/{workspace}/{repo_slug}/branch-restrictions",
        "{workspace}/{repo_slug}/{id}",
    ),
    resource(
        "bitbucket_branching_model",
        "Branching model settings",
        "2.0/repositories/{workspace}/{repo_slug}/branching-model/settings",
        "{workspace}/{repo_slug}",
    ),
    resource(
        "bitbucket_default_reviewer",
        "Default reviewer of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/default-reviewers",
        "{workspace}/{repo_slug}/{target_username}",
    ),
    resource(
        "bitbucket_repository_hook",
        "Repository webhook",
        "2.0/repositories/{workspace}/{repo_slug}/hooks",
        "{workspace}/{repo_slug}/{uuid}",
    ),
    resource(
        "bitbucket_repository_user_permission",
        "Explicit user permission on a repository",
        "2.0/repositories/{workspace}/{repo_slug}/permissions-config/users",
        "{workspace}/{repo_slug}/{selected_user_id}",
    ),
    resource(
        "bitbucket_repository_group_permission",
        "Explicit group permission on a repository",
        "2.0/repositories/{workspace}/{repo_slug}/permissions-config/groups",
        "{workspace}/{repo_slug}/{group_slug}",
    ),
    resource(
        "bitbucket_deploy_key",
        "Repository deploy key",
        "2.0/repositories/{workspace}/{repo_slug}/deploy-keys",
        "{workspace}/{repo_slug}/{id}",
    ),
    resource(
        "bitbucket_deployment_environment",
        "Deployment environment",
        "2.0/repositories/{workspace}/{repo_slug}/environments",
        "{workspace}/{repo_slug}/{uuid}",
    ),
    resource(
        "bitbucket_deployment_variable",
        "Deployment environment variable",
        "2.0/repositories/{workspace}/{repo_slug}/deployments_config/environments/{environment_uuid}/variables",
        "{workspace}/{repo_slug}/{environment_uuid}/{uuid}",
    ),
    resource(
        "bitbucket_pipeline_config",
        "Pipelines enablement of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config",
        "{workspace}/{repo_slug}",
    ),
    resource(
        "bitbucket_pipeline_variable",
        "Repository pipeline variable",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config/variables",
        "{workspace}/{repo_slug}/{uuid}",
    ),
    resource(
        "bitbucket_pipeline_ssh_known_host",
        "Pipelines SSH known host",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config/ssh/known_hosts",
        "{workspace}/{repo_slug}/{uuid}",
    ),
    resource(
        "bitbucket_pipeline_ssh_key_pair",
        "Pipelines SSH key pair",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config/ssh/key_pair",
        "{workspace}/{repo_slug}",
    ),
    resource(
        "bitbucket_commit_status",
        "Build status of a commit",
        "2.0/repositories/{workspace}/{repo_slug}/commit/{commit}/statuses/build",
        "{workspace}/{repo_slug}/{commit}/{key}",
    ),
    resource(
        "bitbucket_issue",
        "Issue",
        "2.0/repositories/{workspace}/{repo_slug}/issues",
        "{workspace}/{repo_slug}/{id}",
    ),
    resource(
        "bitbucket_issue_comment",
        "Comment on an issue",
        "2.0/repositories/{workspace}/{repo_slug}/issues/{issue_id}/comments",
        "{workspace}/{repo_slug}/{issue_id}/{id}",
    ),
    resource(
        "bitbucket_pull_request",
        "Pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests",
        "{workspace}/{repo_slug}/{id}",
    ),
    resource(
        "bitbucket_pull_request_comment",
        "Comment on a pull request",
        "2.0/repositories/{workspace}/{repo_slug}/pullrequests/{pull_request_id}/comments",
        "{workspace}/{repo_slug}/{pull_request_id}/{id}",
    ),
    resource(
        "bitbucket_project",
        "Project",
        "2.0/workspaces/{workspace}/projects",
        "{workspace}/{key}",
    ),
    resource(
        "bitbucket_project_default_reviewer",
        "Default reviewer of a project",
        "2.0/workspaces/{workspace}/projects/{project_key}/default-reviewers",
        "{workspace}/{project_key}/{selected_user}",
    ),
    resource(
        "bitbucket_workspace_hook",
        "Workspace webhook",
        "2.0/workspaces/{workspace}/hooks",
        "{workspace}/{uuid}",
    ),
    resource(
        "bitbucket_workspace_variable",
        "Workspace pipeline variable",
        "2.0/workspaces/{workspace}/pipelines-config/variables",
        "{workspace}/{uuid}",
    ),
    resource(
        "bitbucket_ssh_key",
        "SSH key of an account",
        "2.0/users/{selected_user}/ssh-keys",
        "{selected_user}/{uuid}",
    ),
    resource(
        "bitbucket_snippet",
        "Snippet",
        "2.0/snippets/{workspace}",
        "{workspace}/{id}",
    ),
];
