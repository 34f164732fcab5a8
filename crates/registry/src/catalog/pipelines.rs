use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{REPO, REPO_SLUG, SORT, VARIABLE_ITEM, WORKSPACE, collection, scalar};

const PIPELINE_UUID: ParamSpec = ParamSpec::path("pipeline_uuid");

const PIPELINE_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::integer("build_number"),
    FieldSpec::string("created_on"),
    FieldSpec::string("completed_on"),
    FieldSpec::integer("build_seconds_used"),
    FieldSpec::string("state_name").from("state.name"),
    FieldSpec::string("result_name").from("state.result.name"),
    FieldSpec::string("ref_name").from("target.ref_name"),
    FieldSpec::string("commit_hash").from("target.commit.hash"),
    FieldSpec::map("state"),
    FieldSpec::map("target"),
    FieldSpec::map("trigger"),
    FieldSpec::map("creator"),
];

const STEP_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("name"),
    FieldSpec::string("started_on"),
    FieldSpec::string("completed_on"),
    FieldSpec::integer("duration_in_seconds"),
    FieldSpec::string("state_name").from("state.name"),
    FieldSpec::string("result_name").from("state.result.name"),
    FieldSpec::string("image_name").from("image.name"),
    FieldSpec::map("state"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_pipelines",
        "Pipeline runs of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines",
        &[WORKSPACE, REPO_SLUG, SORT, ParamSpec::query("status"), ParamSpec::query("target_ref_name").wire("target.ref_name")],
        "pipelines",
        PIPELINE_FIELDS,
        "{workspace}/{repo_slug}/pipelines",
    ),
    scalar(
        "bitbucket_pipeline",
        "A single pipeline run",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}",
        &[WORKSPACE, REPO_SLUG, PIPELINE_UUID],
        PIPELINE_FIELDS,
        "{workspace}/{repo_slug}/pipelines/{pipeline_uuid}",
    ),
    collection(
        "bitbucket_pipeline_steps",
        "Steps of a pipeline run",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps",
        &[WORKSPACE, REPO_SLUG, PIPELINE_UUID],
        "steps",
        STEP_FIELDS,
        "{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps",
    ),
    scalar(
        "bitbucket_pipeline_step",
        "A single step of a pipeline run",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps/{step_uuid}",
        &[WORKSPACE, REPO_SLUG, PIPELINE_UUID, ParamSpec::path("step_uuid")],
        STEP_FIELDS,
        "{workspace}/{repo_slug}/pipelines/{pipeline_uuid}/steps/{step_uuid}",
    ),
    scalar(
        "bitbucket_pipeline_config",
        "Pipelines configuration of a repository",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config",
        REPO,
        &[
            FieldSpec::bool("enabled"),
            FieldSpec::string("type"),
            FieldSpec::map("repository"),
        ],
        "{workspace}/{repo_slug}/pipelines_config",
    ),
    collection(
        "bitbucket_pipeline_variables",
        "Repository-level pipeline variables",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config/variables",
        REPO,
        "variables",
        VARIABLE_ITEM,
        "{workspace}/{repo_slug}/pipelines_config/variables",
    ),
    collection(
        "bitbucket_pipeline_ssh_known_hosts",
        "Known hosts trusted by pipelines",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config/ssh/known_hosts",
        REPO,
        "known_hosts",
        &[
            FieldSpec::string("uuid").required(),
            FieldSpec::string("hostname"),
            FieldSpec::string("key_type").from("public_key.key_type"),
            FieldSpec::string("key").from("public_key.key"),
            FieldSpec::string("md5_fingerprint").from("public_key.md5_fingerprint"),
            FieldSpec::string("sha256_fingerprint").from("public_key.sha256_fingerprint"),
        ],
        "{workspace}/{repo_slug}/pipelines_config/ssh/known_hosts",
    ),
    scalar(
        "bitbucket_pipeline_ssh_key_pair",
        "Public half of the pipelines SSH key pair",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines_config/ssh/key_pair",
        REPO,
        &[FieldSpec::string("public_key"), FieldSpec::string("type")],
        "{workspace}/{repo_slug}/pipelines_config/ssh/key_pair",
    ),
    collection(
        "bitbucket_pipeline_caches",
        "Dependency caches of a repository's pipelines",
        "2.0/repositories/{workspace}/{repo_slug}/pipelines-config/caches",
        REPO,
        "caches",
        &[
            FieldSpec::string("uuid").required(),
            FieldSpec::string("pipeline_uuid"),
            FieldSpec::string("step_uuid"),
            FieldSpec::string("name"),
            FieldSpec::string("key_hash"),
            FieldSpec::string("path"),
            FieldSpec::integer("file_size_bytes"),
            FieldSpec::string("created_on"),
        ],
        "{workspace}/{repo_slug}/pipelines-config/caches",
    ),
    collection(
        "bitbucket_deployment_variables",
        "Variables of a deployment environment",
        "2.0/repositories/{workspace}/{repo_slug}/deployments_config/environments/{environment_uuid}/variables",
        &[WORKSPACE, REPO_SLUG, ParamSpec::path("environment_uuid")],
        "variables",
        VARIABLE_ITEM,
        "{workspace}/{repo_slug}/deployments_config/environments/{environment_uuid}/variables",
    ),
];
