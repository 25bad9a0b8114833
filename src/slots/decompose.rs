//! Slot decomposition
//!
//! Matches the visible children of a composite node against a schema's
//! slots, in schema order. Each candidate's score is the clamped sum of
//! `weight × predicate` over the slot's rules; the best unclaimed candidate
//! at or above the slot threshold wins (or every such candidate, for
//! multi-slots). Container slots recurse into the matched node. A required
//! container that is missing is reconstructed from its expected contents
//! when those sit directly under the decomposition root.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::leaf::LeafPipeline;
use crate::node::{DesignNode, NodeKind};
use crate::scoring::ScoreSheet;
use crate::signals::NodeCache;
use crate::similarity::{match_keywords, KeywordMatch};
use crate::slots::schema::{RuleKind, SlotPosition, SlotSchema, SlotSpec, TextRole};
use crate::types::{clamp_unit, serialize_node_refs, ComponentType};

const REQUIRED_WEIGHT: f64 = 2.0;
const OPTIONAL_WEIGHT: f64 = 1.0;
/// A container rebuilt from flattened contents is trusted slightly less
const FLATTENED_DISCOUNT: f64 = 0.9;
/// Predicate value of a fuzzy (typo-tolerant) name hit
const FUZZY_NAME: f64 = 0.7;
/// How far below a candidate `contains_component` looks
const CONTAINS_DEPTH: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct SlotMapping<'a> {
    pub slot_name: String,
    /// Enclosing slot for nested slots (`CardTitle` inside `CardHeader`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_slot: Option<String>,
    #[serde(serialize_with = "serialize_node_refs")]
    pub matched_nodes: Vec<&'a DesignNode>,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub required: bool,
    /// Container slot reconstructed from siblings of its expected contents
    pub flattened: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SemanticMappingResult<'a> {
    pub component_type: ComponentType,
    pub schema: String,
    pub mappings: Vec<SlotMapping<'a>>,
    pub overall_confidence: f64,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl<'a> SemanticMappingResult<'a> {
    /// First mapping for `slot`
    pub fn mapping(&self, slot: &str) -> Option<&SlotMapping<'a>> {
        self.mappings.iter().find(|m| m.slot_name == slot)
    }

    pub fn slot_names(&self) -> Vec<&str> {
        self.mappings.iter().map(|m| m.slot_name.as_str()).collect()
    }
}

/// Accumulated results of one decomposition request
#[derive(Default)]
struct Outcome<'a> {
    mappings: Vec<SlotMapping<'a>>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
    missing_required: usize,
}

impl<'a> Outcome<'a> {
    fn absorb(&mut self, other: Outcome<'a>) {
        self.mappings.extend(other.mappings);
        self.warnings.extend(other.warnings);
        self.suggestions.extend(other.suggestions);
        self.missing_required += other.missing_required;
    }

    /// Weighted mean; required slots count double and a missing required
    /// slot counts as zero. Unmatched optional slots are left out.
    fn overall_confidence(&self) -> f64 {
        let (mut sum, mut weight) = (0.0, 0.0);
        for m in &self.mappings {
            let w = if m.required { REQUIRED_WEIGHT } else { OPTIONAL_WEIGHT };
            sum += w * m.confidence;
            weight += w;
        }
        weight += REQUIRED_WEIGHT * self.missing_required as f64;
        if weight == 0.0 {
            0.0
        } else {
            clamp_unit(sum / weight)
        }
    }
}

struct Candidate<'c, 'a> {
    node: &'a DesignNode,
    index: usize,
    siblings: &'c [&'a DesignNode],
}

struct Scored {
    index: usize,
    score: f64,
    reasons: Vec<String>,
}

pub struct Decomposer<'e, 'a> {
    leaf: &'e LeafPipeline,
    config: &'e EngineConfig,
    cache: &'e NodeCache<'a>,
}

impl<'e, 'a> Decomposer<'e, 'a> {
    pub fn new(leaf: &'e LeafPipeline, config: &'e EngineConfig, cache: &'e NodeCache<'a>) -> Self {
        Self { leaf, config, cache }
    }

    /// Never fails: missing structure is reported in `warnings`.
    pub fn decompose(&self, node: &'a DesignNode, schema: &SlotSchema) -> SemanticMappingResult<'a> {
        let mut out = Outcome::default();
        let children: Vec<&'a DesignNode> = node.visible_children().collect();

        if children.is_empty() {
            out.warnings.push(format!("layer '{}' has no children to decompose", node.name));
        } else {
            let mut claimed = vec![false; children.len()];
            self.match_slots(&schema.slots, &children, &mut claimed, None, 1, &mut out);
            for (child, taken) in children.iter().zip(&claimed) {
                if !taken {
                    out.warnings.push(format!("layer '{}' is not mapped to any slot", child.name));
                }
            }
        }

        let overall_confidence = out.overall_confidence();
        debug!(
            node = %node.name,
            schema = %schema.name,
            slots = out.mappings.len(),
            overall_confidence,
            "slot decomposition"
        );
        SemanticMappingResult {
            component_type: schema.component,
            schema: schema.name.clone(),
            mappings: out.mappings,
            overall_confidence,
            warnings: out.warnings,
            suggestions: out.suggestions,
        }
    }

    fn match_slots(
        &self,
        specs: &[SlotSpec],
        siblings: &[&'a DesignNode],
        claimed: &mut [bool],
        parent: Option<&str>,
        depth: usize,
        out: &mut Outcome<'a>,
    ) {
        if depth > self.config.max_depth {
            warn!(depth, max_depth = self.config.max_depth, "slot decomposition hit the depth guard");
            out.warnings.push(format!(
                "slots nested deeper than {} levels were not decomposed",
                self.config.max_depth
            ));
            return;
        }

        for spec in specs {
            let accepted = self.accept(spec, siblings, claimed);
            if accepted.is_empty() {
                let rebuilt = spec.required
                    && spec.is_container()
                    && self.flatten(spec, siblings, claimed, parent, depth, out);
                if !rebuilt && spec.required {
                    out.missing_required += 1;
                    let scope = parent.map(|p| format!(" in {p}")).unwrap_or_default();
                    out.warnings.push(format!("required slot {}{scope} was not matched", spec.name));
                }
                continue;
            }

            for c in &accepted {
                claimed[c.index] = true;
                let node = siblings[c.index];
                if self.config.in_suggestion_band(c.score) {
                    if let Some(keyword) = spec.primary_keyword() {
                        out.suggestions.push(format!(
                            "consider renaming layer '{}' to include '{keyword}'",
                            node.name
                        ));
                    }
                }
            }

            let nodes: Vec<&'a DesignNode> = accepted.iter().map(|c| siblings[c.index]).collect();
            let confidence = accepted.iter().map(|c| c.score).sum::<f64>() / accepted.len() as f64;
            let reasons = if let [only] = accepted.as_slice() {
                only.reasons.clone()
            } else {
                accepted
                    .iter()
                    .map(|c| format!("'{}' scored {:.2}", siblings[c.index].name, c.score))
                    .collect()
            };
            out.mappings.push(SlotMapping {
                slot_name: spec.name.clone(),
                parent_slot: parent.map(str::to_owned),
                matched_nodes: nodes.clone(),
                confidence,
                reasons,
                required: spec.required,
                flattened: false,
            });

            if spec.is_container() {
                for node in nodes {
                    let inner: Vec<&'a DesignNode> = node.visible_children().collect();
                    let mut inner_claimed = vec![false; inner.len()];
                    self.match_slots(
                        &spec.child_slots,
                        &inner,
                        &mut inner_claimed,
                        Some(spec.name.as_str()),
                        depth + 1,
                        out,
                    );
                }
            }
        }
    }

    /// Match a missing container's child slots against the current level.
    /// Succeeds only if at least one child slot is found; otherwise nothing
    /// is recorded and no sibling is claimed.
    fn flatten(
        &self,
        spec: &SlotSpec,
        siblings: &[&'a DesignNode],
        claimed: &mut [bool],
        parent: Option<&str>,
        depth: usize,
        out: &mut Outcome<'a>,
    ) -> bool {
        let mut probe = Outcome::default();
        self.match_slots(
            &spec.child_slots,
            siblings,
            claimed,
            Some(spec.name.as_str()),
            depth + 1,
            &mut probe,
        );

        let direct: Vec<&SlotMapping<'a>> = probe
            .mappings
            .iter()
            .filter(|m| m.parent_slot.as_deref() == Some(spec.name.as_str()))
            .collect();
        if direct.is_empty() {
            return false;
        }

        let mean = direct.iter().map(|m| m.confidence).sum::<f64>() / direct.len() as f64;
        let names: Vec<&str> = direct.iter().map(|m| m.slot_name.as_str()).collect();
        let nodes: Vec<&'a DesignNode> = direct.iter().flat_map(|m| m.matched_nodes.iter().copied()).collect();
        debug!(slot = %spec.name, children = ?names, "container slot rebuilt from flattened contents");

        out.suggestions.push(format!(
            "group {} under a '{}' container",
            names.join(" and "),
            spec.name
        ));
        out.mappings.push(SlotMapping {
            slot_name: spec.name.clone(),
            parent_slot: parent.map(str::to_owned),
            matched_nodes: nodes,
            confidence: FLATTENED_DISCOUNT * mean,
            reasons: vec![format!(
                "container absent; contents found as siblings ({})",
                names.join(", ")
            )],
            required: spec.required,
            flattened: true,
        });
        out.absorb(probe);
        true
    }

    /// Candidates at or above the slot threshold: the best one, or all for
    /// multi-slots. Ties go to the earlier sibling.
    fn accept(&self, spec: &SlotSpec, siblings: &[&'a DesignNode], claimed: &[bool]) -> Vec<Scored> {
        let mut above = Vec::new();
        for (index, &node) in siblings.iter().enumerate() {
            if claimed[index] {
                continue;
            }
            let candidate = Candidate { node, index, siblings };
            let (score, reasons) = self.score(spec, &candidate);
            trace!(slot = %spec.name, candidate = %node.name, score, "slot candidate");
            if score >= self.config.slot_threshold {
                above.push(Scored { index, score, reasons });
            }
        }
        if spec.allows_multiple {
            return above;
        }
        above
            .into_iter()
            .fold(None::<Scored>, |best, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            })
            .into_iter()
            .collect()
    }

    fn score(&self, spec: &SlotSpec, candidate: &Candidate<'_, 'a>) -> (f64, Vec<String>) {
        let mut sheet = ScoreSheet::new();
        for rule in &spec.rules {
            let value = self.predicate(&rule.kind, candidate);
            let contribution = rule.weight * value;
            if contribution > 0.0 {
                sheet.add(contribution, rule.kind.label());
            }
        }
        sheet.into_parts()
    }

    fn predicate(&self, kind: &RuleKind, c: &Candidate<'_, 'a>) -> f64 {
        let node = c.node;
        match kind {
            RuleKind::NameKeyword { keywords } => {
                let facts = self.cache.facts(node);
                let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
                match match_keywords(&facts.tokens, &keywords) {
                    Some(KeywordMatch::Exact(_)) => 1.0,
                    Some(KeywordMatch::Fuzzy { .. }) => FUZZY_NAME,
                    None => 0.0,
                }
            }
            RuleKind::Position { at } => position_score(*at, c.index, c.siblings.len()),
            RuleKind::IsText => indicator(node.kind == NodeKind::Text),
            RuleKind::IsContainer => indicator(node.kind.is_container()),
            RuleKind::TextRole { role } => text_role_score(*role, c),
            RuleKind::Component { types } => indicator(types.contains(&self.classify(node))),
            RuleKind::ContainsComponent { types } => indicator(self.contains(node, types, CONTAINS_DEPTH)),
            RuleKind::HasChildren { min } => indicator(node.visible_children().count() >= *min),
            RuleKind::Layout { axis } => indicator(node.layout.mode == *axis),
        }
    }

    fn classify(&self, node: &'a DesignNode) -> ComponentType {
        self.leaf.classify_cached(node, self.cache).component_type
    }

    fn contains(&self, node: &'a DesignNode, types: &[ComponentType], depth: usize) -> bool {
        if depth == 0 {
            return false;
        }
        node.visible_children()
            .any(|child| types.contains(&self.classify(child)) || self.contains(child, types, depth - 1))
    }
}

fn indicator(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

fn position_score(at: SlotPosition, index: usize, count: usize) -> f64 {
    let hit = match at {
        SlotPosition::First => index == 0,
        SlotPosition::Second => index == 1,
        SlotPosition::Last => count > 1 && index + 1 == count,
        SlotPosition::Middle => count >= 3 && index > 0 && index + 1 < count,
    };
    indicator(hit)
}

/// Heading: the largest font among text siblings. Body: anything smaller.
/// Unknown or uniform sizes are inconclusive (0.5).
fn text_role_score(role: TextRole, c: &Candidate<'_, '_>) -> f64 {
    if c.node.kind != NodeKind::Text {
        return 0.0;
    }
    let Some(size) = font_size(c.node) else {
        return 0.5;
    };
    let sizes: Vec<f64> = c
        .siblings
        .iter()
        .filter(|s| s.kind == NodeKind::Text)
        .filter_map(|s| font_size(s))
        .collect();
    let max = sizes.iter().copied().fold(size, f64::max);
    let has_smaller = sizes.iter().any(|s| *s < max);
    match role {
        TextRole::Heading if size >= max => {
            if has_smaller {
                1.0
            } else {
                0.5
            }
        }
        TextRole::Heading => 0.0,
        TextRole::Body if size < max => 1.0,
        TextRole::Body if has_smaller => 0.0,
        TextRole::Body => 0.5,
    }
}

fn font_size(node: &DesignNode) -> Option<f64> {
    node.text
        .as_ref()
        .and_then(|t| t.font_size)
        .filter(|s| s.is_finite() && *s > 0.0)
}
