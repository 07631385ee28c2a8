//! Property tests for watch reconciliation.

use proptest::prelude::*;

use auaust::application::{FragmentStore, WatchManager};
use auaust::domain::entities::RequiredSet;
use auaust::domain::value_objects::FragmentRoots;
use auaust::infrastructure::RecordingNotifier;
use auaust::{FragmentId, FragmentKind};

fn roots() -> FragmentRoots {
    FragmentRoots {
        local_dir: "/w/PROJECTS/demo/IMPORTS".into(),
        global_dir: "/w/GLOBALS".into(),
        extension: "js".to_string(),
    }
}

fn required_set() -> impl Strategy<Value = RequiredSet> {
    proptest::collection::vec((any::<bool>(), "[a-e]{1,2}"), 0..=8).prop_map(|ids| {
        let mut required = RequiredSet::new();
        for (global, name) in ids {
            let kind = if global {
                FragmentKind::Global
            } else {
                FragmentKind::Local
            };
            required.insert(&FragmentId::new(kind, name));
        }
        required
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Reconciling twice with the same set is a no-op the second time.
    #[test]
    fn property_reconcile_is_idempotent(first in required_set(), second in required_set()) {
        let mut store = FragmentStore::new(roots());
        let mut watches = WatchManager::new();
        let mut notifier = RecordingNotifier::new();

        watches.reconcile(&first, &mut store, &mut notifier);
        watches.reconcile(&second, &mut store, &mut notifier);
        let calls = notifier.calls().len();

        let again = watches.reconcile(&second, &mut store, &mut notifier);
        prop_assert!(again.is_noop());
        prop_assert_eq!(notifier.calls().len(), calls);
    }

    /// PROPERTY: After reconciling, the watched set equals the required set.
    #[test]
    fn property_watched_matches_required(first in required_set(), second in required_set()) {
        let mut store = FragmentStore::new(roots());
        let mut watches = WatchManager::new();
        let mut notifier = RecordingNotifier::new();

        watches.reconcile(&first, &mut store, &mut notifier);
        watches.reconcile(&second, &mut store, &mut notifier);

        prop_assert_eq!(watches.len(), second.len());
        for id in second.iter() {
            prop_assert!(watches.is_watched(&id));
            prop_assert!(notifier.is_subscribed(store.path_of(&id)));
        }
        prop_assert_eq!(notifier.subscriptions().len(), second.len());
    }
}
