//! End-to-end checks through the facade.

use std::sync::Arc;

use arbor_acl::{Acl, CheckRequest, Subject, Target};
use arbor_core::{
    AuthenticatedUser, DefaultPolicy, Descriptor, DescriptorSchema, RequestContext, ResourceId,
    Route, Verdict,
};

use crate::common::{COMMENTS, CountingStore, POSTS, POSTS_EDIT, SITE, TestHarness, role, user};

#[tokio::test]
async fn test_role_grant_applies_to_user_without_own_rule() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["editor"]);
    let editor = harness.store.add_role("editor");
    harness.store.grant(editor, POSTS);

    let acl = harness.acl();
    assert_eq!(acl.check_user(&user("alice"), POSTS).await.unwrap(), Verdict::Grant);
}

#[tokio::test]
async fn test_user_deny_overrides_granting_roles() {
    let mut harness = TestHarness::new();
    let alice = harness.user_with_roles("alice", &["editor", "author"]);
    let editor = harness.store.add_role("editor");
    let author = harness.store.add_role("author");
    harness.store.grant(editor, POSTS);
    harness.store.grant(author, POSTS);
    harness.store.deny(alice, POSTS);

    let acl = harness.acl();
    assert_eq!(acl.check_user(&user("alice"), POSTS).await.unwrap(), Verdict::Deny);
}

#[tokio::test]
async fn test_unlocatable_descriptor_is_unset() {
    let mut harness = TestHarness::new();
    let alice = harness.user_with_roles("alice", &[]);
    harness.store.grant(alice, SITE);

    let acl = harness.acl();
    let descriptor = DescriptorSchema::default()
        .parse_path("Invoices/edit/5")
        .unwrap();
    assert_eq!(
        acl.check_user(&user("alice"), descriptor).await.unwrap(),
        Verdict::Unset
    );
}

#[tokio::test]
async fn test_rule_on_ancestor_is_inherited() {
    let mut harness = TestHarness::new();
    let alice = harness.user_with_roles("alice", &[]);
    harness.store.grant(alice, SITE);
    harness.store.deny(alice, POSTS);

    let acl = harness.acl();
    assert_eq!(acl.check_user(&user("alice"), COMMENTS).await.unwrap(), Verdict::Grant);
    assert_eq!(acl.check_user(&user("alice"), POSTS_EDIT).await.unwrap(), Verdict::Deny);
}

#[tokio::test]
async fn test_descriptor_falls_back_to_controller_rule() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["editor"]);
    let editor = harness.store.add_role("editor");
    harness.store.grant(editor, POSTS);

    let acl = harness.acl();
    let descriptor = DescriptorSchema::default().parse_path("Posts/delete/5").unwrap();
    assert_eq!(acl.locator().locate(&descriptor).await.unwrap(), Some(POSTS));
    assert_eq!(
        acl.check_user(&user("alice"), descriptor).await.unwrap(),
        Verdict::Grant
    );
}

#[tokio::test]
async fn test_role_check_ignores_membership() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["editor"]);
    let editor = harness.store.add_role("editor");
    harness.store.deny(editor, POSTS_EDIT);
    harness.store.grant(editor, POSTS);

    let acl = harness.acl();
    assert_eq!(acl.check_role(&role("editor"), POSTS).await.unwrap(), Verdict::Grant);
    assert_eq!(
        acl.check_role(&role("editor"), POSTS_EDIT).await.unwrap(),
        Verdict::Deny
    );
}

#[tokio::test]
async fn test_current_user_and_route_from_context() {
    let mut harness = TestHarness::new();
    let alice = harness.user_with_roles("alice", &[]);
    harness.store.grant(alice, POSTS_EDIT);

    let acl = harness.acl();
    let ctx = RequestContext::new()
        .with_user(AuthenticatedUser::new("alice"))
        .with_route(Route::new("Posts", "edit").with_param("5"));

    assert_eq!(acl.check_current(&ctx, false).await.unwrap(), Verdict::Grant);
    // Posts/edit/5 is not defined, so the param is dropped.
    assert_eq!(acl.check_current(&ctx, true).await.unwrap(), Verdict::Grant);
}

#[tokio::test]
async fn test_current_user_with_explicit_resource() {
    let mut harness = TestHarness::new();
    let bob = harness.user_with_roles("bob", &[]);
    harness.store.deny(bob, SITE);

    let acl = harness.acl();
    let ctx = RequestContext::new().with_user(AuthenticatedUser::new("bob"));
    let request = CheckRequest::new(Subject::CurrentUser, COMMENTS);
    assert_eq!(acl.check(&ctx, &request).await.unwrap(), Verdict::Deny);
}

#[tokio::test]
async fn test_context_without_route_is_unset() {
    let mut harness = TestHarness::new();
    let alice = harness.user_with_roles("alice", &[]);
    harness.store.grant(alice, SITE);

    let acl = harness.acl();
    let ctx = RequestContext::new().with_user(AuthenticatedUser::new("alice"));
    let request = CheckRequest::new(Subject::CurrentUser, Target::Current);
    assert_eq!(acl.check(&ctx, &request).await.unwrap(), Verdict::Unset);
}

#[tokio::test]
async fn test_is_allowed_applies_default_policy() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &[]);

    let ctx = RequestContext::new();
    let request = CheckRequest::new(user("alice"), POSTS);

    let acl = harness.acl();
    assert!(!acl.is_allowed(&ctx, &request).await.unwrap());

    harness.config.default_policy = DefaultPolicy::Allow;
    let acl = harness.acl();
    assert!(acl.is_allowed(&ctx, &request).await.unwrap());
}

#[tokio::test]
async fn test_repeated_checks_are_identical() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["viewer", "editor"]);
    let viewer = harness.store.add_role("viewer");
    harness.store.grant(viewer, SITE);

    let acl = harness.acl();
    let first = acl.check_user(&user("alice"), POSTS_EDIT).await.unwrap();
    for _ in 0..10 {
        assert_eq!(acl.check_user(&user("alice"), POSTS_EDIT).await.unwrap(), first);
    }
}

#[tokio::test]
async fn test_each_actor_walked_once_per_check() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["editor"]);
    let editor = harness.store.add_role("editor");
    harness.store.grant(editor, POSTS_EDIT);

    let store = Arc::new(CountingStore::new(harness.store.clone()));
    let acl = Acl::with_backend(store.clone(), harness.config.clone());
    assert_eq!(acl.check_user(&user("alice"), POSTS_EDIT).await.unwrap(), Verdict::Grant);

    // User walk visits 3, 2 and 1; the role walk stops at 3.
    assert_eq!(store.edge_lookups(), 4);
    // Existence is checked at each walk's start and at the user walk's root.
    assert_eq!(store.exists_lookups(), 3);
}

#[tokio::test]
async fn test_deep_walk_checks_existence_at_ends_only() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &[]);
    let mut parent = POSTS_EDIT;
    for id in 10..30 {
        let node = ResourceId::new(id);
        harness.store.add_resource(node, Some(parent));
        parent = node;
    }

    let store = Arc::new(CountingStore::new(harness.store.clone()));
    let acl = Acl::with_backend(store.clone(), harness.config.clone());
    assert_eq!(acl.check_user(&user("alice"), parent).await.unwrap(), Verdict::Unset);

    assert_eq!(store.edge_lookups(), 23);
    assert_eq!(store.exists_lookups(), 2);
}

#[tokio::test]
async fn test_locate_by_descriptor_pairs() {
    let harness = TestHarness::new();
    let acl = harness.acl();
    let descriptor = Descriptor::from_pairs([("action", "edit"), ("controller", "Posts")]);
    assert_eq!(acl.locator().locate(&descriptor).await.unwrap(), Some(POSTS_EDIT));
}

#[tokio::test]
async fn test_out_of_order_pairs_generalize_to_controller() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["editor"]);
    let editor = harness.store.add_role("editor");
    harness.store.grant(editor, POSTS);

    let acl = harness.acl();
    let descriptor = Descriptor::from_pairs([("action", "view"), ("controller", "Posts")]);
    assert_eq!(acl.locator().locate(&descriptor).await.unwrap(), Some(POSTS));
    assert_eq!(
        acl.check_user(&user("alice"), descriptor).await.unwrap(),
        Verdict::Grant
    );
}
