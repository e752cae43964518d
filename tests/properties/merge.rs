//! Property tests for template shallow-merge.

use proptest::prelude::*;

use convoy::models::{CommandSpec, DeploymentPatch, ModuleRef};

fn field() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["graphql", "rest", "api", "admin"])
        .prop_map(str::to_string))
}

fn patch() -> impl Strategy<Value = DeploymentPatch> {
    (
        field(),
        field(),
        prop::option::of(prop::sample::select(vec!["Query", "Mutation"]).prop_map(|c| {
            CommandSpec::One(c.to_string())
        })),
        prop::option::of(prop::collection::vec(
            prop::sample::select(vec!["account", "member"])
                .prop_map(|n| ModuleRef::Name(n.to_string())),
            0..3,
        )),
        field(),
    )
        .prop_map(|(kind, name, of, modules, template)| DeploymentPatch {
            kind,
            name,
            of,
            modules,
            template,
        })
}

proptest! {
    /// PROPERTY: Every field set on the entry survives the merge unchanged;
    /// unset fields fall back to the template's.
    #[test]
    fn property_entry_fields_win(entry in patch(), template in patch()) {
        let merged = entry.clone().merged_over(&template);
        prop_assert_eq!(merged.kind, entry.kind.or(template.kind));
        prop_assert_eq!(merged.name, entry.name.or(template.name));
        prop_assert_eq!(merged.of, entry.of.or(template.of));
        prop_assert_eq!(merged.modules, entry.modules.or(template.modules));
    }

    /// PROPERTY: A merged entry never carries a template reference, so
    /// re-expansion is a no-op.
    #[test]
    fn property_merge_is_idempotent(entry in patch(), template in patch()) {
        let merged = entry.merged_over(&template);
        prop_assert_eq!(merged.template.clone(), None);

        let again = merged.clone().merged_over(&DeploymentPatch::default());
        prop_assert_eq!(again, merged);
    }

    /// PROPERTY: Merging over an empty template changes nothing but the
    /// template field itself.
    #[test]
    fn property_empty_template_is_identity(entry in patch()) {
        let merged = entry.clone().merged_over(&DeploymentPatch::default());
        prop_assert_eq!(merged.kind, entry.kind);
        prop_assert_eq!(merged.name, entry.name);
        prop_assert_eq!(merged.of, entry.of);
        prop_assert_eq!(merged.modules, entry.modules);
    }
}
