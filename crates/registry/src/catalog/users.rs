use bitbucket_types::{BindingSpec, FieldSpec, ParamSpec};

use super::{Q, SORT, USER_REF, collection, scalar};

const ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("uuid").required(),
    FieldSpec::string("account_id"),
    FieldSpec::string("display_name"),
    FieldSpec::string("nickname"),
    FieldSpec::string("username"),
    FieldSpec::string("account_status"),
    FieldSpec::string("location"),
    FieldSpec::string("created_on"),
    FieldSpec::bool("has_2fa_enabled"),
    FieldSpec::map("links"),
];

pub(crate) const BINDINGS: &[BindingSpec] = &[
    scalar(
        "bitbucket_current_user",
        "The authenticated account",
        "2.0/user",
        &[],
        ACCOUNT_FIELDS,
        "{uuid}",
    ),
    collection(
        "bitbucket_current_user_emails",
        "Email addresses of the authenticated account",
        "2.0/user/emails",
        &[],
        "emails",
        &[
            FieldSpec::string("email").required(),
            FieldSpec::bool("is_primary"),
            FieldSpec::bool("is_confirmed"),
            FieldSpec::string("type"),
        ],
        "user/emails",
    ),
    scalar(
        "bitbucket_user",
        "A single account by UUID or account id",
        "2.0/users/{selected_user}",
        &[ParamSpec::path("selected_user")],
        ACCOUNT_FIELDS,
        "{selected_user}",
    ),
    collection(
        "bitbucket_user_ssh_keys",
        "SSH keys of an account",
        "2.0/users/{selected_user}/ssh-keys",
        &[ParamSpec::path("selected_user")],
        "ssh_keys",
        &[
            FieldSpec::string("uuid").required(),
            FieldSpec::string("key"),
            FieldSpec::string("label"),
            FieldSpec::string("comment"),
            FieldSpec::string("created_on"),
            FieldSpec::string("last_used"),
        ],
        "{selected_user}/ssh-keys",
    ),
    collection(
        "bitbucket_current_user_workspace_permissions",
        "Workspace memberships of the authenticated account",
        "2.0/user/permissions/workspaces",
        &[Q, SORT],
        "permissions",
        &[
            FieldSpec::string("permission").required(),
            FieldSpec::object("user", USER_REF),
            FieldSpec::string("workspace_slug").from("workspace.slug"),
        ],
        "user/permissions/workspaces",
    ),
    collection(
        "bitbucket_current_user_repository_permissions",
        "Repository permissions of the authenticated account",
        "2.0/user/permissions/repositories",
        &[Q, SORT],
        "permissions",
        &[
            FieldSpec::string("permission").required(),
            FieldSpec::object("user", USER_REF),
            FieldSpec::string("repository").from("repository.full_name"),
        ],
        "user/permissions/repositories",
    ),
];
