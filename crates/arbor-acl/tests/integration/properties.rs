//! Property tests for role aggregation and hierarchy inheritance.

use arbor_core::{ResourceId, Verdict};
use proptest::prelude::*;

use crate::common::{POSTS, TestHarness, user};

fn verdict() -> impl Strategy<Value = Verdict> {
    prop_oneof![Just(Verdict::Deny), Just(Verdict::Unset), Just(Verdict::Grant)]
}

/// Reference aggregation over role verdicts in order.
fn aggregate(verdicts: &[Verdict]) -> Verdict {
    let mut acc = Verdict::Unset;
    for v in verdicts {
        if v.is_denied() {
            return Verdict::Deny;
        }
        acc = *v;
    }
    acc
}

fn check_with_roles(verdicts: &[Verdict]) -> Verdict {
    let mut harness = TestHarness::new();
    harness.store.add_user("u");
    for (i, v) in verdicts.iter().enumerate() {
        let name = format!("r{i}");
        let id = harness.store.add_role(name.as_str());
        harness.store.add_membership("u", name.as_str());
        if !v.is_unset() {
            harness.store.set_permission(id, POSTS, *v);
        }
    }
    let acl = harness.acl();
    tokio_test::block_on(acl.check_user(&user("u"), POSTS)).unwrap()
}

proptest! {
    #[test]
    fn test_aggregation_follows_role_order(verdicts in prop::collection::vec(verdict(), 0..6)) {
        prop_assert_eq!(check_with_roles(&verdicts), aggregate(&verdicts));
    }

    #[test]
    fn test_any_deny_wins(
        mut verdicts in prop::collection::vec(verdict(), 0..6),
        at in any::<prop::sample::Index>(),
    ) {
        let i = at.index(verdicts.len() + 1);
        verdicts.insert(i, Verdict::Deny);
        prop_assert_eq!(check_with_roles(&verdicts), Verdict::Deny);
    }

    #[test]
    fn test_no_edges_anywhere_is_unset(depth in 1u64..20) {
        let mut harness = TestHarness::new();
        harness.store.add_user("u");
        for id in 1000..1000 + depth {
            let parent = (id > 1000).then(|| ResourceId::new(id - 1));
            harness.store.add_resource(ResourceId::new(id), parent);
        }
        let acl = harness.acl();
        let leaf = ResourceId::new(1000 + depth - 1);
        let verdict = tokio_test::block_on(acl.check_user(&user("u"), leaf)).unwrap();
        prop_assert_eq!(verdict, Verdict::Unset);
    }

    #[test]
    fn test_nearest_edge_wins(depth in 2u64..20, near in verdict(), far in verdict()) {
        let mut harness = TestHarness::new();
        let u = harness.store.add_user("u");
        for id in 2000..2000 + depth {
            let parent = (id > 2000).then(|| ResourceId::new(id - 1));
            harness.store.add_resource(ResourceId::new(id), parent);
        }
        let leaf = ResourceId::new(2000 + depth - 1);
        harness.store.set_permission(u, ResourceId::new(2000), far);
        harness.store.set_permission(u, leaf, near);
        let acl = harness.acl();
        let verdict = tokio_test::block_on(acl.check_user(&user("u"), leaf)).unwrap();
        prop_assert_eq!(verdict, near);
    }
}
