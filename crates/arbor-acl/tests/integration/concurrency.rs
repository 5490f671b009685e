//! Concurrent checks against a shared ACL.

use arbor_core::{ResourceId, Verdict};
use futures::future::join_all;

use crate::common::{COMMENTS, POSTS, POSTS_EDIT, SITE, TestHarness, user};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_checks_match_sequential() {
    let mut harness = TestHarness::new();
    harness.user_with_roles("alice", &["viewer", "editor"]);
    harness.user_with_roles("bob", &["viewer"]);
    let viewer = harness.store.add_role("viewer");
    let editor = harness.store.add_role("editor");
    harness.store.grant(viewer, SITE);
    harness.store.deny(viewer, POSTS_EDIT);
    harness.store.grant(editor, POSTS);

    let acl = harness.acl();
    let cases: Vec<(&str, ResourceId)> = ["alice", "bob"]
        .into_iter()
        .flat_map(|u| [SITE, POSTS, POSTS_EDIT, COMMENTS].map(|r| (u, r)))
        .collect();

    let mut expected = Vec::new();
    for (u, r) in &cases {
        expected.push(acl.check_user(&user(u), *r).await.unwrap());
    }

    let handles = cases.iter().cycle().take(cases.len() * 8).map(|(u, r)| {
        let acl = acl.clone();
        let u = user(u);
        let r = *r;
        tokio::spawn(async move { acl.check_user(&u, r).await })
    });
    let results = join_all(handles).await;

    for (i, result) in results.into_iter().enumerate() {
        let verdict = result.unwrap().unwrap();
        assert_eq!(verdict, expected[i % cases.len()]);
    }
    assert_eq!(expected[2], Verdict::Deny);
}
