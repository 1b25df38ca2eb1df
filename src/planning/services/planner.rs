//! Capability-based agent selection.

use super::{KeywordScorer, PlannerConfig, Relevance, RelevanceScorer};
use crate::analysis::domain::QueryClassification;
use crate::planning::domain::{
    ExecutionPlan, HandoffStrategy, PlanStep, PlanningError, keywords_for,
};
use crate::registry::domain::{AgentDescriptor, Capability};
use std::cmp::Reverse;
use std::collections::HashSet;

struct Candidate<'a> {
    agent: &'a AgentDescriptor,
    relevance: Relevance,
    notes: Vec<String>,
}

impl Candidate<'_> {
    fn rationale(&self) -> String {
        let matched: Vec<&str> = self
            .relevance
            .matched
            .iter()
            .map(Capability::as_str)
            .collect();
        let mut rationale = format!(
            "relevance {} from capabilities [{}]",
            self.relevance.score,
            matched.join(", ")
        );
        for note in &self.notes {
            rationale.push_str("; ");
            rationale.push_str(note);
        }
        rationale
    }
}

/// Selects and orders agents for a classified query.
pub struct AgentPlanner<S = KeywordScorer>
where
    S: RelevanceScorer,
{
    scorer: S,
    config: PlannerConfig,
}

impl AgentPlanner<KeywordScorer> {
    /// Creates a planner using keyword scoring.
    #[must_use]
    pub const fn new(config: PlannerConfig) -> Self {
        Self {
            scorer: KeywordScorer,
            config,
        }
    }
}

impl Default for AgentPlanner<KeywordScorer> {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl<S> AgentPlanner<S>
where
    S: RelevanceScorer,
{
    /// Creates a planner with a custom scorer.
    #[must_use]
    pub const fn with_scorer(scorer: S, config: PlannerConfig) -> Self {
        Self { scorer, config }
    }

    /// Returns the selection policy.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds a plan for `classification` from `agents`.
    ///
    /// Unreachable agents are never selected. Agents are ranked by score,
    /// then by number of capabilities, then by identifier. A direct pattern
    /// keeps the best agent; sequential and parallel patterns keep the top
    /// `top_k`, then apply prerequisite rules.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::EmptyPlan`] when no agent reaches
    /// `min_relevance`.
    pub fn plan(
        &self,
        classification: &QueryClassification,
        agents: &[AgentDescriptor],
    ) -> Result<ExecutionPlan, PlanningError> {
        let keywords = keywords_for(classification);
        let threshold = self.config.min_relevance.max(1);
        let mut seen = HashSet::new();

        let mut ranked: Vec<Candidate<'_>> = agents
            .iter()
            .filter(|agent| agent.status().is_selectable())
            .filter(|agent| seen.insert(agent.id().clone()))
            .map(|agent| Candidate {
                agent,
                relevance: self.scorer.score(&keywords, agent),
                notes: Vec::new(),
            })
            .filter(|candidate| candidate.relevance.score >= threshold)
            .collect();

        ranked.sort_by(|left, right| {
            Reverse(left.relevance.score)
                .cmp(&Reverse(right.relevance.score))
                .then_with(|| {
                    Reverse(left.agent.capabilities().len())
                        .cmp(&Reverse(right.agent.capabilities().len()))
                })
                .then_with(|| left.agent.id().cmp(right.agent.id()))
        });

        for candidate in &ranked {
            tracing::debug!(
                agent_id = %candidate.agent.id(),
                score = candidate.relevance.score,
                "agent scored"
            );
        }

        let strategy = HandoffStrategy::from(classification.orchestration_pattern());
        let limit = match strategy {
            HandoffStrategy::Direct => 1,
            HandoffStrategy::Sequential | HandoffStrategy::Parallel => self.config.top_k.max(1),
        };
        ranked.truncate(limit);

        if ranked.is_empty() {
            tracing::info!(keywords = keywords.len(), "no agent cleared the relevance threshold");
            return Err(PlanningError::EmptyPlan);
        }

        if strategy != HandoffStrategy::Direct {
            self.apply_prerequisites(&mut ranked);
        }

        let steps = ranked
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                PlanStep::new(
                    index,
                    candidate.agent,
                    candidate.relevance.score,
                    candidate.rationale(),
                )
            })
            .collect();

        let plan = ExecutionPlan::new(steps, strategy)?;
        tracing::info!(
            strategy = %plan.handoff_strategy(),
            agents = ?plan.agent_ids().map(ToString::to_string).collect::<Vec<_>>(),
            "execution plan built"
        );
        Ok(plan)
    }

    fn apply_prerequisites(&self, ranked: &mut Vec<Candidate<'_>>) {
        for _ in 0..ranked.len() {
            let mut moved = false;
            for rule in &self.config.prerequisites {
                let dependent = ranked
                    .iter()
                    .position(|candidate| rule.is_dependent(candidate.agent));
                let prerequisite = ranked
                    .iter()
                    .rposition(|candidate| rule.is_prerequisite(candidate.agent));

                match (dependent, prerequisite) {
                    (Some(target), Some(source)) if source > target => {
                        let mut candidate = ranked.remove(source);
                        let promoted = candidate.agent.id().to_string();
                        if let Some(displaced) = ranked.get_mut(target) {
                            candidate.notes.push(format!(
                                "moved ahead of {} ({} before {})",
                                displaced.agent.id(),
                                rule.before(),
                                rule.after()
                            ));
                            displaced.notes.push(format!(
                                "pushed behind {promoted} ({} before {})",
                                rule.before(),
                                rule.after()
                            ));
                        }
                        ranked.insert(target, candidate);
                        moved = true;
                    }
                    _ => {}
                }
            }
            if !moved {
                break;
            }
        }
    }
}
