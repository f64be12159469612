//! Tests for solver configuration.

use super::*;

fn leaf_kinds(config: &MoveSelectorConfig) -> Vec<&'static str> {
    config
        .extract_leaf_configs()
        .iter()
        .map(|c| c.kind())
        .collect()
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42

        [termination]
        seconds_spent_limit = 30

        [[phases]]
        type = "construction_heuristic"

        [[phases]]
        type = "local_search"
        [phases.move_selector]
        type = "cartesian_product"
        ignore_empty_child_iterators = true
        [[phases.move_selector.selectors]]
        type = "change"
        variable_name = "employee"
        selection_order = "random"
        [[phases.move_selector.selectors]]
        type = "pillar_swap"
        variable_names = ["employee"]
        [phases.move_selector.selectors.sub_pillar]
        enabled = true
        maximum_size = 3
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.phases.len(), 2);

    let selector = match &config.phases[1] {
        PhaseConfig::LocalSearch(ls) => ls.move_selector.clone().unwrap(),
        other => panic!("unexpected phase {:?}", other),
    };
    match &selector {
        MoveSelectorConfig::CartesianProduct(c) => {
            assert_eq!(c.ignore_empty_child_iterators, Some(true));
        }
        other => panic!("unexpected selector {:?}", other),
    }
    assert_eq!(leaf_kinds(&selector), vec!["change", "pillar_swap"]);

    let change = &selector.children()[0];
    assert_eq!(change.common().selection_order, Some(SelectionOrder::Random));

    match &selector.children()[1] {
        MoveSelectorConfig::PillarSwap(p) => {
            let sub = p.sub_pillar.as_ref().unwrap();
            assert_eq!(sub.enabled, Some(true));
            assert_eq!(sub.maximum_size, Some(3));
            assert_eq!(p.variable_names, vec!["employee".to_string()]);
        }
        other => panic!("unexpected selector {:?}", other),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: non_reproducible
        random_seed: 42
        termination:
          seconds_spent_limit: 30
        move_selector_templates:
          chains:
            type: sub_chain_change
            select_reversing_move_too: true
        phases:
          - type: construction_heuristic
          - type: local_search
            move_selector:
              type: union
              selector_probability_weight_factory: by_size
              selectors:
                - type: tail_chain_swap
                  fixed_probability_weight: 2.5
                - type: sub_chain_change
                  inherit_from: chains
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::NonReproducible);
    assert_eq!(config.effective_seed(), None);
    assert!(config.move_selector_templates.contains_key("chains"));

    let selector = match &config.phases[1] {
        PhaseConfig::LocalSearch(ls) => ls.move_selector.clone().unwrap(),
        other => panic!("unexpected phase {:?}", other),
    };
    assert_eq!(
        selector.children()[0].common().fixed_probability_weight,
        Some(2.5)
    );
}

#[test]
fn test_unknown_selector_type_is_rejected() {
    let toml = r#"
        type = "three_opt"
    "#;
    assert!(toml::from_str::<MoveSelectorConfig>(toml).is_err());
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.effective_seed(), Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.phases.len(), 2);
}

#[test]
fn test_default_seed_is_zero() {
    assert_eq!(SolverConfig::default().effective_seed(), Some(0));
}

// ============================================================================
// Inheritance
// ============================================================================

#[test]
fn test_inherit_overwrites_only_unset_scalars() {
    let mut child = MoveSelectorConfig::change("employee");
    let mut parent = MoveSelectorConfig::change("shift").with_selection_order(SelectionOrder::Random);
    parent.common_mut().selected_count_limit = Some(10);

    child.inherit(&parent).unwrap();

    match &child {
        MoveSelectorConfig::Change(c) => {
            assert_eq!(c.variable_name.as_deref(), Some("employee"));
            assert_eq!(c.common.selection_order, Some(SelectionOrder::Random));
            assert_eq!(c.common.selected_count_limit, Some(10));
        }
        other => panic!("unexpected selector {:?}", other),
    }
}

#[test]
fn test_inherit_merges_lists() {
    let mut child = MoveSelectorConfig::union(vec![
        MoveSelectorConfig::change("a"),
        MoveSelectorConfig::swap(),
    ]);
    let parent = MoveSelectorConfig::union(vec![
        MoveSelectorConfig::swap(),
        MoveSelectorConfig::change("b"),
    ]);

    child.inherit(&parent).unwrap();

    let children = child.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], MoveSelectorConfig::change("a"));
    assert_eq!(children[1], MoveSelectorConfig::swap());
    assert_eq!(children[2], MoveSelectorConfig::change("b"));
}

#[test]
fn test_inherit_fills_empty_list() {
    let mut child = MoveSelectorConfig::cartesian_product(vec![]);
    let parent = MoveSelectorConfig::cartesian_product(vec![MoveSelectorConfig::swap()]);

    child.inherit(&parent).unwrap();
    assert_eq!(child.children(), parent.children());
}

#[test]
fn test_inherit_merges_sub_pillar_fields() {
    let mut child = MoveSelectorConfig::PillarChange(PillarChangeMoveConfig {
        sub_pillar: Some(SubPillarConfig {
            enabled: Some(true),
            ..SubPillarConfig::default()
        }),
        ..PillarChangeMoveConfig::default()
    });
    let parent = MoveSelectorConfig::PillarChange(PillarChangeMoveConfig {
        sub_pillar: Some(SubPillarConfig {
            enabled: Some(false),
            minimum_size: Some(2),
            maximum_size: None,
        }),
        ..PillarChangeMoveConfig::default()
    });

    child.inherit(&parent).unwrap();

    match child {
        MoveSelectorConfig::PillarChange(c) => {
            let sub = c.sub_pillar.unwrap();
            assert_eq!(sub.enabled, Some(true));
            assert_eq!(sub.minimum_size, Some(2));
        }
        other => panic!("unexpected selector {:?}", other),
    }
}

#[test]
fn test_inherit_kind_mismatch() {
    let mut child = MoveSelectorConfig::swap();
    let err = child.inherit(&MoveSelectorConfig::change("x")).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::KindMismatch {
            expected: "swap",
            found: "change",
            ..
        }
    ));
}

#[test]
fn test_copy_then_inherit_self_is_identity() {
    let configs = vec![
        MoveSelectorConfig::change("employee").with_selection_order(SelectionOrder::Random),
        MoveSelectorConfig::union(vec![
            MoveSelectorConfig::swap(),
            MoveSelectorConfig::cartesian_product(vec![
                MoveSelectorConfig::change("a"),
                MoveSelectorConfig::change("b"),
            ]),
        ]),
        MoveSelectorConfig::SubChainSwap(SubChainSwapMoveConfig {
            maximum_sub_chain_size: Some(4),
            select_reversing_move_too: Some(true),
            ..SubChainSwapMoveConfig::default()
        }),
    ];

    for config in configs {
        let mut copy = config.copy_config();
        copy.inherit(&config).unwrap();
        assert_eq!(copy, config.copy_config());
    }
}

#[test]
fn test_copy_config_is_independent() {
    let original = MoveSelectorConfig::union(vec![MoveSelectorConfig::swap()]);
    let mut copy = original.copy_config();
    copy.common_mut().selected_count_limit = Some(3);
    if let MoveSelectorConfig::Union(u) = &mut copy {
        u.selectors.push(MoveSelectorConfig::change("x"));
    }

    assert_eq!(original.children().len(), 1);
    assert_eq!(original.common().selected_count_limit, None);
}

// ============================================================================
// Leaf extraction and validation
// ============================================================================

#[test]
fn test_extract_leaf_configs_depth_first() {
    let config = MoveSelectorConfig::union(vec![
        MoveSelectorConfig::change("a"),
        MoveSelectorConfig::cartesian_product(vec![
            MoveSelectorConfig::swap(),
            MoveSelectorConfig::union(vec![MoveSelectorConfig::change("b")]),
        ]),
        MoveSelectorConfig::change("c"),
    ]);

    let leaves = config.extract_leaf_configs();
    assert_eq!(leaves.len(), 4);
    assert_eq!(*leaves[0], MoveSelectorConfig::change("a"));
    assert_eq!(*leaves[1], MoveSelectorConfig::swap());
    assert_eq!(*leaves[2], MoveSelectorConfig::change("b"));
    assert_eq!(*leaves[3], MoveSelectorConfig::change("c"));
}

#[test]
fn test_leaf_extracts_itself() {
    let leaf = MoveSelectorConfig::swap();
    assert_eq!(leaf.extract_leaf_configs(), vec![&leaf]);
}

#[test]
fn test_validate_reports_path_of_empty_composite() {
    let config = MoveSelectorConfig::union(vec![
        MoveSelectorConfig::swap(),
        MoveSelectorConfig::cartesian_product(vec![]),
    ]);

    let err = config.validate().unwrap_err();
    assert_eq!(err.path(), Some("union.selectors[1]"));
    assert!(err.to_string().contains("union.selectors[1]"));
}

#[test]
fn test_validate_rejects_unusable_weights() {
    for weight in [-0.5, f64::INFINITY, f64::NAN] {
        let mut swap = MoveSelectorConfig::swap();
        swap.common_mut().fixed_probability_weight = Some(weight);
        let config = MoveSelectorConfig::union(vec![MoveSelectorConfig::change("x"), swap]);

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidWeight { .. }));
        assert_eq!(err.path(), Some("union.selectors[1]"));
    }

    let mut zero = MoveSelectorConfig::swap();
    zero.common_mut().fixed_probability_weight = Some(0.0);
    assert!(MoveSelectorConfig::union(vec![zero]).validate().is_ok());
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_template_children_merge_after_resolution() {
    let mut templates = BTreeMap::new();
    templates.insert(
        "fast_change".to_string(),
        MoveSelectorConfig::change("x").with_selection_order(SelectionOrder::Random),
    );
    templates.insert(
        "moves".to_string(),
        MoveSelectorConfig::union(vec![
            MoveSelectorConfig::change("x").with_inherit_from("fast_change"),
            MoveSelectorConfig::swap(),
        ]),
    );
    let config = MoveSelectorConfig::union(vec![
        MoveSelectorConfig::change("x").with_inherit_from("fast_change")
    ])
    .with_inherit_from("moves");

    let resolved = resolve_templates(&config, &templates).unwrap();

    assert_eq!(leaf_kinds(&resolved), vec!["change", "swap"]);
    assert_eq!(
        resolved.children()[0].common().selection_order,
        Some(SelectionOrder::Random)
    );
}

#[test]
fn test_template_chain_resolution() {
    let mut templates = BTreeMap::new();
    templates.insert(
        "base".to_string(),
        MoveSelectorConfig::change("employee").with_selection_order(SelectionOrder::Random),
    );
    let mut limited = MoveSelectorConfig::change("employee").with_inherit_from("base");
    limited.common_mut().selected_count_limit = Some(5);
    templates.insert("limited".to_string(), limited);

    let config = MoveSelectorConfig::Change(ChangeMoveConfig::default()).with_inherit_from("limited");
    let resolved = resolve_templates(&config, &templates).unwrap();

    match resolved {
        MoveSelectorConfig::Change(c) => {
            assert_eq!(c.variable_name.as_deref(), Some("employee"));
            assert_eq!(c.common.selection_order, Some(SelectionOrder::Random));
            assert_eq!(c.common.selected_count_limit, Some(5));
            assert_eq!(c.common.inherit_from, None);
        }
        other => panic!("unexpected selector {:?}", other),
    }
}

#[test]
fn test_cyclic_template_is_rejected() {
    let mut templates = BTreeMap::new();
    templates.insert(
        "a".to_string(),
        MoveSelectorConfig::swap().with_inherit_from("b"),
    );
    templates.insert(
        "b".to_string(),
        MoveSelectorConfig::swap().with_inherit_from("a"),
    );

    let config = MoveSelectorConfig::union(vec![MoveSelectorConfig::swap().with_inherit_from("a")]);
    let err = resolve_templates(&config, &templates).unwrap_err();

    match err {
        ConfigError::CyclicTemplate { path, chain } => {
            assert_eq!(path, "union.selectors[0]");
            assert_eq!(chain, "a -> b -> a");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_template_referencing_itself_through_child_is_rejected() {
    let mut templates = BTreeMap::new();
    templates.insert(
        "loop".to_string(),
        MoveSelectorConfig::union(vec![
            MoveSelectorConfig::union(vec![]).with_inherit_from("loop"),
        ]),
    );

    let config = MoveSelectorConfig::union(vec![]).with_inherit_from("loop");
    let err = resolve_templates(&config, &templates).unwrap_err();
    assert!(matches!(err, ConfigError::CyclicTemplate { .. }));
}

#[test]
fn test_unknown_template_is_rejected() {
    let config = MoveSelectorConfig::union(vec![
        MoveSelectorConfig::swap(),
        MoveSelectorConfig::swap().with_inherit_from("missing"),
    ]);

    let err = resolve_templates(&config, &BTreeMap::new()).unwrap_err();
    assert_eq!(err.path(), Some("union.selectors[1]"));
    assert!(matches!(err, ConfigError::UnknownTemplate { ref name, .. } if name == "missing"));
}

#[test]
fn test_template_kind_mismatch_carries_path() {
    let mut templates = BTreeMap::new();
    templates.insert("swaps".to_string(), MoveSelectorConfig::swap());

    let config = MoveSelectorConfig::union(vec![MoveSelectorConfig::change("x").with_inherit_from("swaps")]);
    let err = resolve_templates(&config, &templates).unwrap_err();

    assert_eq!(err.path(), Some("union.selectors[0]"));
}

#[test]
fn test_resolve_move_selectors_validates() {
    let mut config = SolverConfig::new()
        .with_template("empty", MoveSelectorConfig::union(vec![]))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig {
            move_selector: Some(MoveSelectorConfig::union(vec![]).with_inherit_from("empty")),
            termination: None,
        }));

    let err = config.resolve_move_selectors().unwrap_err();
    assert!(matches!(err, ConfigError::EmptyComposite { .. }));
}

#[test]
fn test_config_error_converts_with_path() {
    let err = ConfigError::UnknownFactory {
        path: "union.selectors[2]".to_string(),
        name: "by_size".to_string(),
    };

    match planforge_core::error::PlanForgeError::from(err) {
        planforge_core::error::PlanForgeError::Config(msg) => {
            assert_eq!(msg, "union.selectors[2]: unknown factory 'by_size'");
        }
        other => panic!("expected config error, got {:?}", other),
    }
}
