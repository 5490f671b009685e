//! Handlers for `arbor check` and `arbor locate`.
//!
//! Handlers return their result as a value; `main` prints it.

use std::path::PathBuf;
use std::sync::Arc;

use arbor_acl::{Acl, CheckRequest, Subject, Target};
use arbor_core::{Descriptor, RequestContext, ResourceId, RoleId, UserId, Verdict};
use arbor_storage::MemoryStore;
use serde::Serialize;

use crate::cli::{CheckArgs, LocateArgs};
use crate::config::ArborConfig;
use crate::error::{Error, Result};

/// Outcome of `arbor check`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// `user` or `role`.
    pub subject_kind: &'static str,
    /// User or role id.
    pub subject: String,
    /// The resource as given on the command line.
    pub target: String,
    /// Resource node the target resolved to, if any.
    pub resource: Option<ResourceId>,
    /// Resolved verdict.
    pub verdict: Verdict,
    /// Verdict after the configured default policy.
    pub allowed: bool,
}

impl CheckOutcome {
    /// Renders the outcome as a bare verdict or a JSON object.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(self.verdict.to_string())
        }
    }
}

fn fixture_path(explicit: Option<&PathBuf>, config: &ArborConfig) -> Result<PathBuf> {
    explicit
        .or(config.store.fixture.as_ref())
        .cloned()
        .ok_or(Error::MissingFixture)
}

fn open_acl(fixture: Option<&PathBuf>, config: &ArborConfig) -> Result<Acl> {
    let path = fixture_path(fixture, config)?;
    let store = MemoryStore::load(&path)?;
    log::debug!("Loaded fixture {}: {store:?}", path.display());
    Ok(Acl::with_backend(Arc::new(store), config.acl.clone()))
}

fn parse_path(path: &str, config: &ArborConfig) -> Result<Descriptor> {
    Ok(config.acl.descriptor_fields.parse_path(path)?)
}

fn check_subject(args: &CheckArgs) -> Result<Subject> {
    match (&args.user, &args.role) {
        (Some(user), None) => Ok(Subject::User(UserId::from(user.as_str()))),
        (None, Some(role)) => Ok(Subject::Role(RoleId::from(role.as_str()))),
        _ => Err(Error::Usage("pass exactly one of --user or --role".into())),
    }
}

fn check_target(args: &CheckArgs, config: &ArborConfig) -> Result<(Target, String)> {
    match (args.resource, &args.path) {
        (Some(id), None) => Ok((Target::Resource(ResourceId::new(id)), id.to_string())),
        (None, Some(path)) => {
            let schema = &config.acl.descriptor_fields;
            let mut descriptor = parse_path(path, config)?;
            if !args.use_param
                && let Some(field) = schema.param_field()
            {
                descriptor = descriptor.with_field(field, None);
            }
            Ok((Target::Descriptor(descriptor), path.clone()))
        }
        _ => Err(Error::Usage("pass exactly one of --resource or --path".into())),
    }
}

/// Runs `arbor check`.
pub async fn cmd_check(args: &CheckArgs, config: &ArborConfig) -> Result<CheckOutcome> {
    let subject = check_subject(args)?;
    let (target, target_label) = check_target(args, config)?;
    let acl = open_acl(args.fixture.as_ref(), config)?;

    let subject_kind = if subject.is_role() { "role" } else { "user" };
    let subject_label = match &subject {
        Subject::User(user) => user.to_string(),
        Subject::Role(role) => role.to_string(),
        Subject::CurrentUser => String::new(),
    };

    let request = CheckRequest::new(subject, target);
    let decision = acl.decide(&RequestContext::new(), &request).await?;

    Ok(CheckOutcome {
        subject_kind,
        subject: subject_label,
        target: target_label,
        resource: decision.resource,
        verdict: decision.verdict,
        allowed: decision.verdict.allows(config.acl.default_policy),
    })
}

/// Runs `arbor locate`. Returns `None` when no resource matches.
pub async fn cmd_locate(args: &LocateArgs, config: &ArborConfig) -> Result<Option<ResourceId>> {
    let acl = open_acl(args.fixture.as_ref(), config)?;
    let descriptor = parse_path(&args.path, config)?;
    Ok(acl.locator().locate(&descriptor).await?)
}

// ============================================================================
// Tests
// ============================================================================
