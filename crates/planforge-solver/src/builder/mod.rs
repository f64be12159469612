//! Wiring between configuration types and runtime selector trees.
//!
//! [`build_move_selector`] turns a resolved [`MoveSelectorConfig`] into a
//! [`MoveSelectorNode`] tree. Variables are looked up in a
//! [`SelectorContext`]; named factories in its [`FactoryRegistry`].

mod registry;


use std::fmt::Debug;

use planforge_config::{
    child_path, CartesianProductMoveConfig, ConfigError, MoveSelectorConfig,
    PhaseConfig, SelectionOrder, SolverConfig, UnionMoveConfig,
};
use planforge_core::domain::{BasicVariable, ChainedVariable, PlanningSolution};
use planforge_core::error::PlanForgeError;

use crate::heuristic::selector::{
    CartesianProductMoveSelector, ChangeMoveSelector, MoveIteratorFactorySelector,
    MoveListFactorySelector, MoveSelectorNode, PillarChangeMoveSelector, PillarSwapMoveSelector,
    SelectorRng, SubChainChangeMoveSelector, SubChainSizes, SubChainSwapMoveSelector,
    SubPillarConfig, SwapMoveSelector, TailChainSwapMoveSelector, UnionMoveSelector,
};

pub use registry::FactoryRegistry;

/// The planning variables and factories a selector tree may refer to.
pub struct SelectorContext<S, V> {
    basic_variables: Vec<(String, BasicVariable<S, V>)>,
    chained_variables: Vec<ChainedVariable<S>>,
    registry: FactoryRegistry<S, V>,
    seed: Option<u64>,
}

impl<S, V> Default for SelectorContext<S, V> {
    fn default() -> Self {
        Self {
            basic_variables: Vec::new(),
            chained_variables: Vec::new(),
            registry: FactoryRegistry::default(),
            seed: Some(0),
        }
    }
}

impl<S, V> Debug for SelectorContext<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let basic: Vec<String> = self
            .basic_variables
            .iter()
            .map(|(class, v)| format!("{}.{}", class, v.variable_name()))
            .collect();
        f.debug_struct("SelectorContext")
            .field("basic_variables", &basic)
            .field("chained_variables", &self.chained_variables)
            .field("registry", &self.registry)
            .field("seed", &self.seed)
            .finish()
    }
}

impl<S, V> SelectorContext<S, V> {
    /// Creates an empty context seeded with 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a basic variable of the named entity class.
    pub fn with_basic_variable(mut self, entity_class: &str, variable: BasicVariable<S, V>) -> Self {
        self.basic_variables.push((entity_class.to_string(), variable));
        self
    }

    pub fn with_chained_variable(mut self, variable: ChainedVariable<S>) -> Self {
        self.chained_variables.push(variable);
        self
    }

    pub fn with_registry(mut self, registry: FactoryRegistry<S, V>) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the root seed of random selectors; `None` seeds from the OS.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn registry(&self) -> &FactoryRegistry<S, V> {
        &self.registry
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn basic(
        &self,
        path: &str,
        entity_class: Option<&str>,
        variable_name: Option<&str>,
    ) -> Result<Vec<BasicVariable<S, V>>, ConfigError> {
        let found: Vec<BasicVariable<S, V>> = self
            .basic_variables
            .iter()
            .filter(|(class, _)| entity_class.map_or(true, |c| c == class))
            .filter(|(_, v)| variable_name.map_or(true, |n| n == v.variable_name()))
            .map(|(_, v)| *v)
            .collect();
        if found.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{}: no basic variable matches entity class {:?} and variable {:?}",
                path, entity_class, variable_name
            )));
        }
        Ok(found)
    }

    fn chained(
        &self,
        path: &str,
        variable_name: Option<&str>,
    ) -> Result<Vec<ChainedVariable<S>>, ConfigError> {
        let found: Vec<ChainedVariable<S>> = self
            .chained_variables
            .iter()
            .filter(|v| variable_name.map_or(true, |n| n == v.variable_name()))
            .copied()
            .collect();
        if found.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{}: no chained variable matches {:?}",
                path, variable_name
            )));
        }
        Ok(found)
    }
}

/// Builds the runtime selector tree of a resolved selector config.
///
/// The root runs in original order unless configured otherwise; children
/// inherit their parent's order. Random children get seeds derived from
/// their parent's, so a fixed context seed yields a reproducible tree.
/// A leaf that names no variable covers every matching variable, as a
/// union when more than one matches.
///
/// # Errors
///
/// Returns a [`ConfigError`] carrying the offending path for empty
/// composites, unresolved `inherit_from` references, unknown factories and
/// unknown variables.
///
/// # Example
///
/// ```
/// use planforge_config::{MoveSelectorConfig, SelectionOrder};
/// use planforge_scoring::SimpleScoreDirector;
/// use planforge_solver::builder::{build_move_selector, SelectorContext};
/// use planforge_solver::heuristic::selector::MoveSelector;
/// use planforge_test::task::{calculate_task_score, priority_variable, TaskSolution};
///
/// let context = SelectorContext::new().with_basic_variable("Task", priority_variable());
/// let config = MoveSelectorConfig::union(vec![
///     MoveSelectorConfig::change("priority"),
///     MoveSelectorConfig::swap(),
/// ]);
///
/// let selector = build_move_selector(&config, &context).unwrap();
/// let director = SimpleScoreDirector::new(TaskSolution::from_priorities(&[1, 2]), calculate_task_score);
///
/// // 2 entities x 3 values, plus one swap pair.
/// assert_eq!(selector.size(&director), 7);
/// assert_eq!(selector.kind(), "union");
/// ```
pub fn build_move_selector<S, V>(
    config: &MoveSelectorConfig,
    context: &SelectorContext<S, V>,
) -> Result<MoveSelectorNode<S, V>, ConfigError>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    config.validate()?;
    let rng = match context.seed {
        Some(seed) => SelectorRng::new(seed),
        None => SelectorRng::from_os(),
    };
    build_node(config, context, config.kind(), SelectionOrder::Original, rng)
}

/// Resolves templates and builds the selector tree of every local search
/// phase in `config`, in phase order.
///
/// The context seed is replaced by the config's effective seed.
///
/// # Errors
///
/// Returns [`PlanForgeError::Config`] for any template or build error.
pub fn build_phase_selectors<S, V>(
    config: &SolverConfig,
    context: SelectorContext<S, V>,
) -> Result<Vec<MoveSelectorNode<S, V>>, PlanForgeError>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    let mut resolved = config.clone();
    resolved.resolve_move_selectors()?;
    let context = context.with_seed(resolved.effective_seed());

    let mut selectors = Vec::new();
    for phase in &resolved.phases {
        if let PhaseConfig::LocalSearch(local_search) = phase {
            if let Some(selector) = &local_search.move_selector {
                selectors.push(build_move_selector(selector, &context)?);
            }
        }
    }
    Ok(selectors)
}

fn build_node<S, V>(
    config: &MoveSelectorConfig,
    context: &SelectorContext<S, V>,
    path: &str,
    inherited_order: SelectionOrder,
    rng: SelectorRng,
) -> Result<MoveSelectorNode<S, V>, ConfigError>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    let common = config.common();
    if let Some(name) = &common.inherit_from {
        return Err(ConfigError::UnknownTemplate {
            path: path.to_string(),
            name: name.clone(),
        });
    }
    let order = common.selection_order.unwrap_or(inherited_order);

    let node = match config {
        MoveSelectorConfig::Change(c) => {
            let nodes = context
                .basic(path, c.entity_class.as_deref(), c.variable_name.as_deref())?
                .into_iter()
                .map(|variable| {
                    MoveSelectorNode::Change(ChangeMoveSelector::new(variable).with_order(order, rng.clone()))
                })
                .collect();
            union_of(nodes, order, &rng)
        }
        MoveSelectorConfig::Swap(c) => {
            let mut variables = context.basic(path, c.entity_class.as_deref(), None)?;
            if !c.variable_names.is_empty() {
                variables.retain(|v| c.variable_names.iter().any(|n| n == v.variable_name()));
                check_variables_found(path, &variables, &c.variable_names)?;
            }
            MoveSelectorNode::Swap(SwapMoveSelector::new(variables).with_order(order, rng))
        }
        MoveSelectorConfig::PillarChange(c) => {
            let sub_pillar = sub_pillar(c.sub_pillar.as_ref());
            let nodes = context
                .basic(path, c.entity_class.as_deref(), c.variable_name.as_deref())?
                .into_iter()
                .map(|variable| {
                    MoveSelectorNode::PillarChange(
                        PillarChangeMoveSelector::new(variable, sub_pillar.clone())
                            .with_order(order, rng.clone()),
                    )
                })
                .collect();
            union_of(nodes, order, &rng)
        }
        MoveSelectorConfig::PillarSwap(c) => {
            let mut variables = context.basic(path, c.entity_class.as_deref(), None)?;
            if !c.variable_names.is_empty() {
                variables.retain(|v| c.variable_names.iter().any(|n| n == v.variable_name()));
                check_variables_found(path, &variables, &c.variable_names)?;
            }
            MoveSelectorNode::PillarSwap(
                PillarSwapMoveSelector::new(variables, sub_pillar(c.sub_pillar.as_ref()))
                    .with_order(order, rng),
            )
        }
        MoveSelectorConfig::SubChainChange(c) => {
            let sizes = SubChainSizes::new(c.minimum_sub_chain_size, c.maximum_sub_chain_size);
            let reversing = c.select_reversing_move_too.unwrap_or(true);
            let nodes = context
                .chained(path, c.variable_name.as_deref())?
                .into_iter()
                .map(|variable| {
                    MoveSelectorNode::SubChainChange(
                        SubChainChangeMoveSelector::new(variable, sizes.clone())
                            .with_reversing(reversing)
                            .with_order(order, rng.clone()),
                    )
                })
                .collect();
            union_of(nodes, order, &rng)
        }
        MoveSelectorConfig::SubChainSwap(c) => {
            let sizes = SubChainSizes::new(c.minimum_sub_chain_size, c.maximum_sub_chain_size);
            let reversing = c.select_reversing_move_too.unwrap_or(true);
            let nodes = context
                .chained(path, c.variable_name.as_deref())?
                .into_iter()
                .map(|variable| {
                    MoveSelectorNode::SubChainSwap(
                        SubChainSwapMoveSelector::new(variable, sizes.clone())
                            .with_reversing(reversing)
                            .with_order(order, rng.clone()),
                    )
                })
                .collect();
            union_of(nodes, order, &rng)
        }
        MoveSelectorConfig::TailChainSwap(c) => {
            let nodes = context
                .chained(path, c.variable_name.as_deref())?
                .into_iter()
                .map(|variable| {
                    MoveSelectorNode::TailChainSwap(
                        TailChainSwapMoveSelector::new(variable).with_order(order, rng.clone()),
                    )
                })
                .collect();
            union_of(nodes, order, &rng)
        }
        MoveSelectorConfig::MoveListFactory(c) => {
            let name = factory_name(path, c.factory.as_deref())?;
            let factory = context
                .registry
                .move_list_factory(name)
                .ok_or_else(|| unknown_factory(path, name))?;
            MoveSelectorNode::MoveList(MoveListFactorySelector::new(factory).with_order(order, rng))
        }
        MoveSelectorConfig::MoveIteratorFactory(c) => {
            let name = factory_name(path, c.factory.as_deref())?;
            let factory = context
                .registry
                .move_iterator_factory(name)
                .ok_or_else(|| unknown_factory(path, name))?;
            MoveSelectorNode::MoveIterator(
                MoveIteratorFactorySelector::new(factory).with_order(order, rng),
            )
        }
        MoveSelectorConfig::Union(c) => build_union(c, context, path, order, rng)?,
        MoveSelectorConfig::CartesianProduct(c) => {
            build_cartesian_product(c, context, path, order, rng)?
        }
    };

    let node = match common.selected_count_limit {
        Some(limit) => node.limited(limit),
        None => node,
    };

    tracing::debug!(
        event = "selector_built",
        path = %path,
        kind = node.kind(),
        order = ?order,
        limit = ?common.selected_count_limit,
    );

    Ok(node)
}

fn build_union<S, V>(
    config: &UnionMoveConfig,
    context: &SelectorContext<S, V>,
    path: &str,
    order: SelectionOrder,
    rng: SelectorRng,
) -> Result<MoveSelectorNode<S, V>, ConfigError>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    let children = build_children(&config.selectors, context, path, order, &rng)?;
    let weights = config
        .selectors
        .iter()
        .map(|child| child.common().fixed_probability_weight.unwrap_or(1.0))
        .collect();

    let mut union = UnionMoveSelector::new(children)
        .with_order(order, rng)
        .with_fixed_weights(weights);
    if let Some(name) = &config.selector_probability_weight_factory {
        let factory = context
            .registry
            .weight_factory(name)
            .ok_or_else(|| unknown_factory(path, name))?;
        union = union.with_weight_factory(factory);
    }
    Ok(MoveSelectorNode::Union(union))
}

fn build_cartesian_product<S, V>(
    config: &CartesianProductMoveConfig,
    context: &SelectorContext<S, V>,
    path: &str,
    order: SelectionOrder,
    rng: SelectorRng,
) -> Result<MoveSelectorNode<S, V>, ConfigError>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    let children = build_children(&config.selectors, context, path, order, &rng)?;
    Ok(MoveSelectorNode::CartesianProduct(
        CartesianProductMoveSelector::new(children)
            .with_ignore_empty_child_iterators(config.ignore_empty_child_iterators.unwrap_or(false))
            .with_order(order),
    ))
}

fn build_children<S, V>(
    configs: &[MoveSelectorConfig],
    context: &SelectorContext<S, V>,
    path: &str,
    order: SelectionOrder,
    rng: &SelectorRng,
) -> Result<Vec<MoveSelectorNode<S, V>>, ConfigError>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    configs
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let child_rng = SelectorRng::new(rng.child_seed(i as u64));
            build_node(child, context, &child_path(path, i), order, child_rng)
        })
        .collect()
}

/// Collapses the per-variable leaves of one config entry.
fn union_of<S, V>(
    mut nodes: Vec<MoveSelectorNode<S, V>>,
    order: SelectionOrder,
    rng: &SelectorRng,
) -> MoveSelectorNode<S, V> {
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    MoveSelectorNode::Union(UnionMoveSelector::new(nodes).with_order(order, rng.clone()))
}

fn sub_pillar(config: Option<&planforge_config::SubPillarConfig>) -> SubPillarConfig {
    config.map(SubPillarConfig::from).unwrap_or_default()
}

fn check_variables_found<S, V>(
    path: &str,
    variables: &[BasicVariable<S, V>],
    names: &[String],
) -> Result<(), ConfigError> {
    match names
        .iter()
        .find(|name| !variables.iter().any(|v| v.variable_name() == name.as_str()))
    {
        Some(missing) => Err(ConfigError::Invalid(format!(
            "{}: unknown variable '{}'",
            path, missing
        ))),
        None => Ok(()),
    }
}

fn factory_name<'a>(path: &str, name: Option<&'a str>) -> Result<&'a str, ConfigError> {
    name.ok_or_else(|| ConfigError::Invalid(format!("{}: factory name is required", path)))
}

fn unknown_factory(path: &str, name: &str) -> ConfigError {
    ConfigError::UnknownFactory {
        path: path.to_string(),
        name: name.to_string(),
    }
}
