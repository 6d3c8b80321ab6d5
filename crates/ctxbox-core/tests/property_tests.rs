use std::collections::{HashMap, HashSet};

use ctxbox_core::{Context, Contexts, Layer, Layers, Location, container_name};
use proptest::prelude::*;

fn env_map() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("[A-Z]{1,4}", "[a-z0-9 $]{0,6}", 0..8)
}

fn location() -> Location {
    Location::Local("/work/project/.ctxbox.yaml".into())
}

fn with_env(env: HashMap<String, String>) -> Context {
    Context {
        name: "dev".into(),
        image: "ubuntu:22.04".into(),
        env,
        ..Context::default()
    }
}

proptest! {
    #[test]
    fn test_merge_env_union(a in env_map(), b in env_map()) {
        let left = with_env(a.clone());
        let right = with_env(b.clone());
        let merged = left.merge(&right);

        for (key, value) in &a {
            if !b.contains_key(key) {
                prop_assert_eq!(&merged.env[key], value);
            }
        }
        for (key, value) in &b {
            prop_assert_eq!(&merged.env[key], value);
        }
        let keys: HashSet<_> = a.keys().chain(b.keys()).collect();
        prop_assert_eq!(merged.env.len(), keys.len());
    }

    #[test]
    fn test_merge_leaves_operands_untouched(a in env_map(), b in env_map(), extra in "[A-Z]{5}") {
        let left = with_env(a.clone());
        let right = with_env(b.clone());
        let mut merged = left.merge(&right);

        merged.env.insert(extra.clone(), "changed".to_string());
        merged.env.values_mut().for_each(|v| v.push('!'));

        prop_assert_eq!(&left.env, &a);
        prop_assert_eq!(&right.env, &b);
    }

    #[test]
    fn test_name_ignores_insertion_order(env in env_map(), mounts in env_map()) {
        let mut keys: Vec<_> = env.keys().cloned().collect();
        keys.sort();
        keys.reverse();

        let mut reordered = with_env(HashMap::with_capacity(64));
        for key in keys {
            reordered.env.insert(key.clone(), env[&key].clone());
        }
        for (source, target) in &mounts {
            reordered.mounts.insert(source.clone(), target.clone());
        }

        let mut original = with_env(env);
        original.mounts = mounts;

        prop_assert_eq!(
            container_name(&location(), &original),
            container_name(&location(), &reordered)
        );
    }

    #[test]
    fn test_name_changes_with_env_value(env in env_map(), key in "[A-Z]{1,4}", value in "[a-z]{1,4}") {
        let before = with_env(env.clone());
        let mut after = before.clone();
        let previous = after.env.insert(key.clone(), value.clone());
        prop_assume!(previous.as_deref() != Some(value.as_str()));

        prop_assert_ne!(
            container_name(&location(), &before),
            container_name(&location(), &after)
        );
    }

    #[test]
    fn test_combo_count_is_product(sizes in prop::collection::vec(1usize..4, 0..4)) {
        let layers = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                (0..*size).fold(Layer::new(format!("layer{i}")), |layer, j| {
                    layer.with_context(format!("s{j}"), Context::default())
                })
            })
            .collect();
        let contexts = Contexts::new(
            location(),
            Context { layers: Layers::new(layers), ..Context::default() },
        );

        let combos = contexts.get_combos();
        prop_assert_eq!(combos.len(), sizes.iter().product::<usize>());
        for combo in &combos {
            prop_assert_eq!(combo.len(), sizes.len());
            prop_assert!(contexts.resolve(combo.as_slice()).is_ok());
        }
    }
}
