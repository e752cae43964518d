//! Property tests for command aggregation.

use proptest::prelude::*;

use convoy::models::{CommandSpec, DeploymentEntry, ModuleRef};
use convoy::{aggregate, Manifest};

fn command() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Query", "Mutation", "Subscription", "query"])
        .prop_map(str::to_string)
}

fn module_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["account", "member", "billing", "audit"])
        .prop_map(str::to_string)
}

fn module_ref() -> impl Strategy<Value = ModuleRef> {
    prop_oneof![
        module_name().prop_map(ModuleRef::Name),
        (module_name(), command()).prop_map(|(name, of)| ModuleRef::Override {
            name,
            of: CommandSpec::One(of),
        }),
    ]
}

fn entries() -> impl Strategy<Value = Vec<DeploymentEntry>> {
    prop::collection::vec(
        (
            prop::option::of(prop::collection::vec(command(), 1..3).prop_map(CommandSpec::Many)),
            prop::collection::vec(module_ref(), 0..4),
        ),
        0..6,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (of, modules))| DeploymentEntry {
                kind: "graphql".to_string(),
                name: format!("d{i}"),
                of,
                modules,
            })
            .collect()
    })
}

fn manifest(deployment: Vec<DeploymentEntry>) -> Manifest {
    Manifest {
        version: 1,
        name: None,
        deployment,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Aggregation is commutative over deployment order.
    #[test]
    fn property_aggregation_ignores_deployment_order(
        (original, shuffled) in entries().prop_flat_map(|e| {
            (Just(e.clone()), Just(e).prop_shuffle())
        })
    ) {
        prop_assert_eq!(
            aggregate(&manifest(original)),
            aggregate(&manifest(shuffled))
        );
    }

    /// PROPERTY: Appending entries never removes aggregated commands.
    #[test]
    fn property_appending_entries_never_removes_commands(
        base_entries in entries(),
        extra in entries(),
    ) {
        let base = aggregate(&manifest(base_entries.clone()));

        let mut combined_entries = base_entries;
        combined_entries.extend(extra);
        let combined = aggregate(&manifest(combined_entries));

        for (module, commands) in &base {
            prop_assert!(commands.is_subset(&combined[module]));
        }
    }

    /// PROPERTY: Scalar and single-element sequence `of` normalize identically.
    #[test]
    fn property_scalar_sequence_normalization_lossless(token in "[A-Za-z]{1,16}") {
        let one = CommandSpec::One(token.clone());
        let many = CommandSpec::Many(vec![token]);
        prop_assert_eq!(one.as_vec(), many.as_vec());
    }
}
