use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{collection, scalar, summary};

const LINKER_KEY: ParamSpec = ParamSpec::path("linker_key");

const LINKER_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("key").required(),
    FieldSpec::string("type"),
    FieldSpec::map("links"),
];

const EVENT_ITEM: &[FieldSpec] = &[
    FieldSpec::string("event").required(),
    FieldSpec::string("category"),
    FieldSpec::string("label"),
    FieldSpec::string("description"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    collection(
        "bitbucket_addon_linkers",
        "Linkers registered by the installed app",
        "2.0/addon/linkers",
        &[],
        "linkers",
        LINKER_FIELDS,
        "addon/linkers",
    ),
    scalar(
        "bitbucket_addon_linker",
        "A single app linker",
        "2.0/addon/linkers/{linker_key}",
        &[LINKER_KEY],
        LINKER_FIELDS,
        "addon/linkers/{linker_key}",
    ),
    collection(
        "bitbucket_addon_linker_values",
        "Values attached to an app linker",
        "2.0/addon/linkers/{linker_key}/values",
        &[LINKER_KEY],
        "values",
        &[FieldSpec::integer("id").required(), FieldSpec::string("value")],
        "addon/linkers/{linker_key}/values",
    ),
    summary(
        "bitbucket_addon_webhook_logs_summary",
        "Delivery summary of the app's webhooks",
        "2.0/addon/webhook-logs/summary",
        &[],
        "summary",
        "addon/webhook-logs/summary",
    ),
    collection(
        "bitbucket_hook_events",
        "Subject types that accept webhooks",
        "2.0/hook_events",
        &[],
        "subjects",
        &[FieldSpec::string("subject"), FieldSpec::map("links")],
        "hook_events",
    ),
    collection(
        "bitbucket_hook_event_types",
        "Webhook event types of one subject type",
        "2.0/hook_events/{subject_type}",
        &[ParamSpec::path("subject_type")],
        "events",
        EVENT_ITEM,
        "hook_events/{subject_type}",
    ),
];
