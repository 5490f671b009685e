//! Role aggregation through the facade.

use arbor_core::{Error, Verdict};

use crate::common::{POSTS, POSTS_EDIT, SITE, TestHarness, user};

fn harness_with_roles(roles: &[(&str, Verdict)]) -> TestHarness {
    let mut harness = TestHarness::new();
    let names: Vec<&str> = roles.iter().map(|(name, _)| *name).collect();
    harness.user_with_roles("alice", &names);
    for (name, verdict) in roles {
        let id = harness.store.add_role(*name);
        if !verdict.is_unset() {
            harness.store.set_permission(id, POSTS, *verdict);
        }
    }
    harness
}

#[tokio::test]
async fn test_later_unset_role_overwrites_earlier_grant() {
    let harness = harness_with_roles(&[("r1", Verdict::Grant), ("r2", Verdict::Unset)]);
    let verdict = harness.acl().check_user(&user("alice"), POSTS).await.unwrap();
    assert_eq!(verdict, Verdict::Unset);
}

#[tokio::test]
async fn test_later_grant_role_overwrites_earlier_unset() {
    let harness = harness_with_roles(&[("r2", Verdict::Unset), ("r1", Verdict::Grant)]);
    let verdict = harness.acl().check_user(&user("alice"), POSTS).await.unwrap();
    assert_eq!(verdict, Verdict::Grant);
}

#[tokio::test]
async fn test_deny_wins_in_any_position() {
    for roles in [
        [("a", Verdict::Deny), ("b", Verdict::Grant), ("c", Verdict::Grant)],
        [("a", Verdict::Grant), ("b", Verdict::Deny), ("c", Verdict::Grant)],
        [("a", Verdict::Grant), ("b", Verdict::Unset), ("c", Verdict::Deny)],
    ] {
        let harness = harness_with_roles(&roles);
        let verdict = harness.acl().check_user(&user("alice"), POSTS).await.unwrap();
        assert_eq!(verdict, Verdict::Deny, "roles: {roles:?}");
    }
}

#[tokio::test]
async fn test_user_grant_skips_role_deny() {
    let mut harness = harness_with_roles(&[("banned", Verdict::Deny)]);
    let alice = harness.store.add_user("alice");
    harness.store.grant(alice, SITE);
    let verdict = harness.acl().check_user(&user("alice"), POSTS_EDIT).await.unwrap();
    assert_eq!(verdict, Verdict::Grant);
}

#[tokio::test]
async fn test_no_roles_and_no_rules_is_unset() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &[]);
    let verdict = harness.acl().check_user(&user("alice"), POSTS).await.unwrap();
    assert_eq!(verdict, Verdict::Unset);
}

#[tokio::test]
async fn test_role_without_actor_node() {
    let mut harness = TestHarness::new();
    harness.store.add_user("alice");
    harness.store.add_membership("alice", "ghost");
    let editor = harness.store.add_role("editor");
    harness.store.add_membership("alice", "editor");
    harness.store.grant(editor, POSTS);

    let verdict = harness.acl().check_user(&user("alice"), POSTS).await.unwrap();
    assert_eq!(verdict, Verdict::Grant);

    harness.config.strict_roles = true;
    let err = harness
        .acl()
        .check_user(&user("alice"), POSTS)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { ref kind, ref id } if kind == "role" && id == "ghost"));
}
