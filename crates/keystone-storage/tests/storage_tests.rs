//! Integration tests for keystone-storage.
//!
//! Every backend must behave the same through the store traits.

use keystone_analytics::analyze;
use keystone_core::types::{AnalysisResult, ModelType, Parameters};
use keystone_storage::prelude::*;
use tempfile::tempdir;
use uuid::Uuid;

// =============================================================================
// HELPERS
// =============================================================================

fn fresh(model: ModelType) -> AnalysisResult {
    analyze(&Parameters::default_for(model)).into_result()
}

fn with_backends(check: impl Fn(&dyn Backend)) {
    check(&InMemoryStorage::new());

    let dir = tempdir().unwrap();
    let redb = RedbStorage::open(dir.path().join("keystone.redb")).unwrap();
    check(&redb);
}

trait Backend: SimulationStore + ParameterStore {}
impl<T: SimulationStore + ParameterStore> Backend for T {}

// =============================================================================
// SIMULATIONS
// =============================================================================

#[test]
fn test_saved_results_round_trip() {
    with_backends(|store| {
        let flip = store.save("Flip", fresh(ModelType::BuyAndRenovate)).unwrap();
        let build = store.save("Build", fresh(ModelType::LandAndBuild)).unwrap();

        assert_ne!(flip.id(), build.id());
        assert_eq!(flip.name(), "Flip");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&flip));
        assert!(listed.contains(&build));

        let loaded = store.require(build.id().unwrap()).unwrap();
        assert_eq!(loaded.roi, 60.0);
        assert_eq!(loaded.payback, build.payback);
    });
}

#[test]
fn test_unknown_ids() {
    with_backends(|store| {
        let id = Uuid::new_v4();
        assert_eq!(store.get(id).unwrap(), None);
        assert!(!store.delete(id).unwrap());
        assert!(matches!(
            store.require(id),
            Err(StorageError::NotFound { entity_type: "Simulation", .. })
        ));
    });
}

#[test]
fn test_save_rejections() {
    with_backends(|store| {
        assert!(matches!(
            store.save("\t", fresh(ModelType::LandAndBuild)),
            Err(StorageError::InvalidName(_))
        ));

        let saved = store.save("Once", fresh(ModelType::LandAndBuild)).unwrap();
        assert!(matches!(
            store.save("Twice", saved),
            Err(StorageError::AlreadySaved { .. })
        ));
        assert_eq!(store.list().unwrap().len(), 1);
    });
}

// =============================================================================
// PARAMETERS
// =============================================================================

#[test]
fn test_last_used_parameters_per_model() {
    with_backends(|store| {
        let mut flip = Parameters::default_for(ModelType::BuyAndRenovate);
        if let Parameters::BuyAndRenovate(p) = &mut flip {
            p.property_value = 250_000.0;
        }
        store.save_parameters(&flip).unwrap();

        assert_eq!(store.load_or_default(ModelType::BuyAndRenovate).unwrap(), flip);
        assert_eq!(
            store.load_or_default(ModelType::LandAndBuild).unwrap(),
            Parameters::default_for(ModelType::LandAndBuild)
        );

        // a later save replaces the earlier one
        store
            .save_parameters(&Parameters::default_for(ModelType::BuyAndRenovate))
            .unwrap();
        assert_eq!(
            store.load(ModelType::BuyAndRenovate).unwrap(),
            Some(Parameters::default_for(ModelType::BuyAndRenovate))
        );
    });
}

#[test]
fn test_non_finite_results_are_rejected() {
    with_backends(|store| {
        let good = store.save("Flip", fresh(ModelType::BuyAndRenovate)).unwrap();

        let mut broken = fresh(ModelType::BuyAndRenovate);
        broken.total_investment = f64::NAN;
        assert!(matches!(
            store.save("tiny", broken),
            Err(StorageError::InvalidRecord(_))
        ));

        let mut stale = good.clone();
        stale.roi = f64::NEG_INFINITY;
        assert!(matches!(store.update(&stale), Err(StorageError::InvalidRecord(_))));

        assert_eq!(store.list().unwrap(), vec![good]);
    });
}

// =============================================================================
// PROPERTIES
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_names_are_trimmed_or_rejected(name in "\\PC{0,24}") {
            let store = InMemoryStorage::new();
            match store.save(&name, fresh(ModelType::LandAndBuild)) {
                Ok(saved) => {
                    prop_assert!(!name.trim().is_empty());
                    prop_assert_eq!(saved.name(), name.trim());
                }
                Err(err) => {
                    prop_assert!(name.trim().is_empty());
                    prop_assert!(matches!(err, StorageError::InvalidName(_)), "unexpected {}", err);
                }
            }
        }

        #[test]
        fn prop_list_is_ordered_by_date(count in 1usize..12) {
            let store = InMemoryStorage::new();
            for i in 0..count {
                store.save(&format!("Deal {i}"), fresh(ModelType::BuyAndRenovate)).unwrap();
            }

            let listed = store.list().unwrap();
            prop_assert_eq!(listed.len(), count);
            let dates: Vec<_> = listed
                .iter()
                .map(|r| r.identity.as_ref().map(|i| i.date))
                .collect();
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
