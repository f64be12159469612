//! Move selector configuration tree.
//!
//! A closed tagged enum: every leaf and composite selector kind is one
//! variant, dispatched by pattern matching. Composites own an ordered child
//! list; trees are acyclic by construction.
//!
//! # Example
//!
//! ```
//! use planforge_config::MoveSelectorConfig;
//!
//! let config: MoveSelectorConfig = toml::from_str(r#"
//!     type = "union"
//!
//!     [[selectors]]
//!     type = "change"
//!     variable_name = "employee"
//!
//!     [[selectors]]
//!     type = "swap"
//! "#).unwrap();
//!
//! let leaves = config.extract_leaf_configs();
//! assert_eq!(leaves.len(), 2);
//! assert_eq!(leaves[0].kind(), "change");
//! ```

use serde::{Deserialize, Serialize};

use crate::inherit::{inherit_mergeable_list, inherit_overwritable};
use crate::ConfigError;

/// Order in which a selector yields its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// Finite, single pass, in a stable order.
    Original,
    /// Unbounded, sampled with a seeded random generator.
    Random,
}

/// Properties shared by every selector kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MoveSelectorCommon {
    /// Name of a template in `move_selector_templates` to inherit from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherit_from: Option<String>,

    /// Unset means: inherit from the enclosing selector (root: original).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_order: Option<SelectionOrder>,

    /// Relative weight when sampled by a random union without a weight factory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_probability_weight: Option<f64>,

    /// Maximum number of moves the selector yields per iteration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_count_limit: Option<usize>,
}

impl MoveSelectorCommon {
    fn inherit(&mut self, parent: &MoveSelectorCommon) {
        inherit_overwritable(&mut self.inherit_from, &parent.inherit_from);
        inherit_overwritable(&mut self.selection_order, &parent.selection_order);
        inherit_overwritable(
            &mut self.fixed_probability_weight,
            &parent.fixed_probability_weight,
        );
        inherit_overwritable(&mut self.selected_count_limit, &parent.selected_count_limit);
    }
}

/// Sub-pillar selection: pillars may be split into smaller subsets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubPillarConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_size: Option<usize>,
}

impl SubPillarConfig {
    fn inherit(&mut self, parent: &SubPillarConfig) {
        inherit_overwritable(&mut self.enabled, &parent.enabled);
        inherit_overwritable(&mut self.minimum_size, &parent.minimum_size);
        inherit_overwritable(&mut self.maximum_size, &parent.maximum_size);
    }
}

fn inherit_sub_pillar(child: &mut Option<SubPillarConfig>, parent: &Option<SubPillarConfig>) {
    match (child.as_mut(), parent) {
        (Some(c), Some(p)) => c.inherit(p),
        _ => inherit_overwritable(child, parent),
    }
}

/// Change one entity's variable to another value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChangeMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
}

/// Swap the variables of two entities.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SwapMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_class: Option<String>,
    /// Empty means every basic variable of the entity class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_names: Vec<String>,
}

/// Change the value of every entity of a pillar at once.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PillarChangeMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_pillar: Option<SubPillarConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
}

/// Swap the values of two pillars.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PillarSwapMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_pillar: Option<SubPillarConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_names: Vec<String>,
}

/// Move a sub chain behind another link.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubChainChangeMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_sub_chain_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_sub_chain_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_reversing_move_too: Option<bool>,
}

/// Swap two sub chains.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubChainSwapMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_sub_chain_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_sub_chain_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_reversing_move_too: Option<bool>,
}

/// Swap the tails of two chains (2-opt style).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TailChainSwapMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
}

/// Moves produced by a named factory registered at build time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MoveFactoryConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
}

/// Union of child selectors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UnionMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(default)]
    pub selectors: Vec<MoveSelectorConfig>,
    /// Name of a registered weight factory biasing random child sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector_probability_weight_factory: Option<String>,
}

/// Cartesian product of child selectors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CartesianProductMoveConfig {
    #[serde(flatten)]
    pub common: MoveSelectorCommon,
    #[serde(default)]
    pub selectors: Vec<MoveSelectorConfig>,
    /// Skip children yielding no moves instead of yielding nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_empty_child_iterators: Option<bool>,
}

/// Move selector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveSelectorConfig {
    Change(ChangeMoveConfig),
    Swap(SwapMoveConfig),
    PillarChange(PillarChangeMoveConfig),
    PillarSwap(PillarSwapMoveConfig),
    SubChainChange(SubChainChangeMoveConfig),
    SubChainSwap(SubChainSwapMoveConfig),
    TailChainSwap(TailChainSwapMoveConfig),
    MoveListFactory(MoveFactoryConfig),
    MoveIteratorFactory(MoveFactoryConfig),
    Union(UnionMoveConfig),
    CartesianProduct(CartesianProductMoveConfig),
}

impl MoveSelectorConfig {
    /// Creates a change selector for the named variable.
    pub fn change(variable_name: &str) -> Self {
        Self::Change(ChangeMoveConfig {
            variable_name: Some(variable_name.to_string()),
            ..ChangeMoveConfig::default()
        })
    }

    /// Creates a swap selector over every basic variable.
    pub fn swap() -> Self {
        Self::Swap(SwapMoveConfig::default())
    }

    /// Creates a union of the given children.
    pub fn union(selectors: Vec<MoveSelectorConfig>) -> Self {
        Self::Union(UnionMoveConfig {
            selectors,
            ..UnionMoveConfig::default()
        })
    }

    /// Creates a cartesian product of the given children.
    pub fn cartesian_product(selectors: Vec<MoveSelectorConfig>) -> Self {
        Self::CartesianProduct(CartesianProductMoveConfig {
            selectors,
            ..CartesianProductMoveConfig::default()
        })
    }

    /// Sets the selection order.
    pub fn with_selection_order(mut self, order: SelectionOrder) -> Self {
        self.common_mut().selection_order = Some(order);
        self
    }

    /// Sets the template to inherit from.
    pub fn with_inherit_from(mut self, template: &str) -> Self {
        self.common_mut().inherit_from = Some(template.to_string());
        self
    }

    /// Returns the serialized tag of this kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Change(_) => "change",
            Self::Swap(_) => "swap",
            Self::PillarChange(_) => "pillar_change",
            Self::PillarSwap(_) => "pillar_swap",
            Self::SubChainChange(_) => "sub_chain_change",
            Self::SubChainSwap(_) => "sub_chain_swap",
            Self::TailChainSwap(_) => "tail_chain_swap",
            Self::MoveListFactory(_) => "move_list_factory",
            Self::MoveIteratorFactory(_) => "move_iterator_factory",
            Self::Union(_) => "union",
            Self::CartesianProduct(_) => "cartesian_product",
        }
    }

    pub fn common(&self) -> &MoveSelectorCommon {
        match self {
            Self::Change(c) => &c.common,
            Self::Swap(c) => &c.common,
            Self::PillarChange(c) => &c.common,
            Self::PillarSwap(c) => &c.common,
            Self::SubChainChange(c) => &c.common,
            Self::SubChainSwap(c) => &c.common,
            Self::TailChainSwap(c) => &c.common,
            Self::MoveListFactory(c) | Self::MoveIteratorFactory(c) => &c.common,
            Self::Union(c) => &c.common,
            Self::CartesianProduct(c) => &c.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut MoveSelectorCommon {
        match self {
            Self::Change(c) => &mut c.common,
            Self::Swap(c) => &mut c.common,
            Self::PillarChange(c) => &mut c.common,
            Self::PillarSwap(c) => &mut c.common,
            Self::SubChainChange(c) => &mut c.common,
            Self::SubChainSwap(c) => &mut c.common,
            Self::TailChainSwap(c) => &mut c.common,
            Self::MoveListFactory(c) | Self::MoveIteratorFactory(c) => &mut c.common,
            Self::Union(c) => &mut c.common,
            Self::CartesianProduct(c) => &mut c.common,
        }
    }

    /// Returns true for union and cartesian product.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Union(_) | Self::CartesianProduct(_))
    }

    /// Returns the child selectors; empty for leaves.
    pub fn children(&self) -> &[MoveSelectorConfig] {
        match self {
            Self::Union(c) => &c.selectors,
            Self::CartesianProduct(c) => &c.selectors,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [MoveSelectorConfig] {
        match self {
            Self::Union(c) => &mut c.selectors,
            Self::CartesianProduct(c) => &mut c.selectors,
            _ => &mut [],
        }
    }

    /// Merges the parent's properties into this config.
    ///
    /// Scalars are taken from the parent only when unset here; lists keep
    /// this config's entries and append the parent's entries not already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KindMismatch`] when the kinds differ.
    pub fn inherit(&mut self, parent: &MoveSelectorConfig) -> Result<(), ConfigError> {
        match (self, parent) {
            (Self::Change(c), Self::Change(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.entity_class, &p.entity_class);
                inherit_overwritable(&mut c.variable_name, &p.variable_name);
            }
            (Self::Swap(c), Self::Swap(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.entity_class, &p.entity_class);
                inherit_mergeable_list(&mut c.variable_names, &p.variable_names);
            }
            (Self::PillarChange(c), Self::PillarChange(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.entity_class, &p.entity_class);
                inherit_sub_pillar(&mut c.sub_pillar, &p.sub_pillar);
                inherit_overwritable(&mut c.variable_name, &p.variable_name);
            }
            (Self::PillarSwap(c), Self::PillarSwap(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.entity_class, &p.entity_class);
                inherit_sub_pillar(&mut c.sub_pillar, &p.sub_pillar);
                inherit_mergeable_list(&mut c.variable_names, &p.variable_names);
            }
            (Self::SubChainChange(c), Self::SubChainChange(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.variable_name, &p.variable_name);
                inherit_overwritable(&mut c.minimum_sub_chain_size, &p.minimum_sub_chain_size);
                inherit_overwritable(&mut c.maximum_sub_chain_size, &p.maximum_sub_chain_size);
                inherit_overwritable(
                    &mut c.select_reversing_move_too,
                    &p.select_reversing_move_too,
                );
            }
            (Self::SubChainSwap(c), Self::SubChainSwap(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.variable_name, &p.variable_name);
                inherit_overwritable(&mut c.minimum_sub_chain_size, &p.minimum_sub_chain_size);
                inherit_overwritable(&mut c.maximum_sub_chain_size, &p.maximum_sub_chain_size);
                inherit_overwritable(
                    &mut c.select_reversing_move_too,
                    &p.select_reversing_move_too,
                );
            }
            (Self::TailChainSwap(c), Self::TailChainSwap(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.variable_name, &p.variable_name);
            }
            (Self::MoveListFactory(c), Self::MoveListFactory(p))
            | (Self::MoveIteratorFactory(c), Self::MoveIteratorFactory(p)) => {
                c.common.inherit(&p.common);
                inherit_overwritable(&mut c.factory, &p.factory);
            }
            (Self::Union(c), Self::Union(p)) => {
                c.common.inherit(&p.common);
                inherit_mergeable_list(&mut c.selectors, &p.selectors);
                inherit_overwritable(
                    &mut c.selector_probability_weight_factory,
                    &p.selector_probability_weight_factory,
                );
            }
            (Self::CartesianProduct(c), Self::CartesianProduct(p)) => {
                c.common.inherit(&p.common);
                inherit_mergeable_list(&mut c.selectors, &p.selectors);
                inherit_overwritable(
                    &mut c.ignore_empty_child_iterators,
                    &p.ignore_empty_child_iterators,
                );
            }
            (child, parent) => {
                return Err(ConfigError::KindMismatch {
                    path: child.kind().to_string(),
                    expected: child.kind(),
                    found: parent.kind(),
                });
            }
        }
        Ok(())
    }

    /// Returns a structurally independent deep copy.
    pub fn copy_config(&self) -> Self {
        self.clone()
    }

    /// Flattens the tree depth-first, left-to-right, returning only leaves.
    pub fn extract_leaf_configs(&self) -> Vec<&MoveSelectorConfig> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a MoveSelectorConfig>) {
        if self.is_composite() {
            for child in self.children() {
                child.collect_leaves(leaves);
            }
        } else {
            leaves.push(self);
        }
    }

    /// Checks that every composite in the tree has children and that every
    /// fixed probability weight is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyComposite`] or
    /// [`ConfigError::InvalidWeight`] with the path of the first offending
    /// selector, e.g. `union.selectors[1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at(self.kind())
    }

    fn validate_at(&self, path: &str) -> Result<(), ConfigError> {
        if let Some(weight) = self.common().fixed_probability_weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    path: path.to_string(),
                    weight,
                });
            }
        }
        if self.is_composite() && self.children().is_empty() {
            return Err(ConfigError::EmptyComposite {
                path: path.to_string(),
            });
        }
        for (i, child) in self.children().iter().enumerate() {
            child.validate_at(&child_path(path, i))?;
        }
        Ok(())
    }
}

/// Returns the path of the i-th child of the selector at `path`.
pub fn child_path(path: &str, index: usize) -> String {
    format!("{}.selectors[{}]", path, index)
}
