use derivative::Derivative;

use crate::fuzzy::{DamerauLevenshtein, Matcher, closest};
use crate::normalize::normalize_target;
use crate::progress::{NoProgress, Progress, fraction};
use crate::{AssignConfig, ChannelKind, ChannelSet, GroupIndex, SourceItem, TargetItem};

/// One texture to be bound to one property of one material
#[derive(Derivative)]
#[derivative(
    Debug(bound = "S: std::fmt::Debug, T: std::fmt::Debug"),
    Clone(bound = ""),
    Copy(bound = "")
)]
pub struct Assignment<'a, S, T> {
    pub target: &'a TargetItem<T>,
    pub channel: ChannelKind,
    /// Property name configured for `channel`
    pub property: &'a str,
    pub source: &'a SourceItem<S>,
}

/// Ask the caller to bind its placeholder texture to `property`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FallbackRequest<'a> {
    pub channel: ChannelKind,
    pub property: &'a str,
}

#[derive(Derivative)]
#[derivative(
    Debug(bound = "S: std::fmt::Debug, T: std::fmt::Debug"),
    Clone(bound = "")
)]
pub enum MatchOutcome<'a, S, T> {
    AssignedExact(Vec<Assignment<'a, S, T>>),
    AssignedFuzzy {
        assignments: Vec<Assignment<'a, S, T>>,
        /// Group key the target was matched against
        matched: String,
        distance: usize,
    },
    Unmatched {
        fallback: Option<FallbackRequest<'a>>,
    },
}

impl<'a, S, T> MatchOutcome<'a, S, T> {
    pub fn assignments(&self) -> &[Assignment<'a, S, T>] {
        match self {
            MatchOutcome::AssignedExact(assignments)
            | MatchOutcome::AssignedFuzzy { assignments, .. } => assignments,
            MatchOutcome::Unmatched { .. } => &[],
        }
    }

    pub fn is_matched(&self) -> bool {
        !matches!(self, MatchOutcome::Unmatched { .. })
    }
}

/// Runs normalization, exact lookup and the optional fuzzy fallback for targets.
///
/// Holds no state between calls; targets are independent of each other.
#[derive(Debug, Clone)]
pub struct AssignmentEngine<'c, M = DamerauLevenshtein> {
    config: &'c AssignConfig,
    matcher: M,
}

impl<'c> AssignmentEngine<'c> {
    pub fn new(config: &'c AssignConfig) -> Self {
        Self::with_matcher(config, DamerauLevenshtein)
    }
}

impl<'c, M: Matcher> AssignmentEngine<'c, M> {
    pub fn with_matcher(config: &'c AssignConfig, matcher: M) -> Self {
        Self { config, matcher }
    }

    pub fn config(&self) -> &'c AssignConfig {
        self.config
    }

    pub fn assign<'a, S, T>(
        &self,
        target: &'a TargetItem<T>,
        index: &GroupIndex<'a, S>,
    ) -> MatchOutcome<'a, S, T>
    where
        'c: 'a,
    {
        let key = normalize_target(&target.name);

        if let Some(set) = index.get(&key) {
            tracing::debug!("`{}` matched `{key}` exactly", target.name);
            return MatchOutcome::AssignedExact(self.emit(target, set));
        }

        if self.config.aggressive_assign {
            if let Some(found) = closest(&self.matcher, &key, index.keys()) {
                if found.distance <= self.config.threshold {
                    tracing::debug!(
                        "`{}` matched `{}` at distance {}",
                        target.name,
                        found.key,
                        found.distance
                    );
                    // key came from the index, so the lookup cannot miss
                    let assignments = index
                        .get(found.key)
                        .map(|set| self.emit(target, set))
                        .unwrap_or_default();
                    return MatchOutcome::AssignedFuzzy {
                        assignments,
                        matched: found.key.to_string(),
                        distance: found.distance,
                    };
                }
            }
        }

        tracing::warn!("Material `{}` has no textures assigned", target.name);
        let fallback = self.config.highlight_missing.then(|| FallbackRequest {
            channel: ChannelKind::Diffuse,
            property: self.config.property(ChannelKind::Diffuse),
        });
        MatchOutcome::Unmatched { fallback }
    }

    /// Assign every target, preserving input order
    pub fn assign_all<'a, S, T>(
        &self,
        targets: &'a [TargetItem<T>],
        index: &GroupIndex<'a, S>,
    ) -> Vec<(&'a TargetItem<T>, MatchOutcome<'a, S, T>)>
    where
        'c: 'a,
    {
        self.assign_all_with_progress(targets, index, &mut NoProgress)
    }

    pub fn assign_all_with_progress<'a, S, T, P: Progress + ?Sized>(
        &self,
        targets: &'a [TargetItem<T>],
        index: &GroupIndex<'a, S>,
        progress: &mut P,
    ) -> Vec<(&'a TargetItem<T>, MatchOutcome<'a, S, T>)>
    where
        'c: 'a,
    {
        let total = targets.len();
        let outcomes: Vec<_> = targets
            .iter()
            .enumerate()
            .map(|(done, target)| {
                progress.report(fraction(done, total), &format!("Assigning ... {}", target.name));
                (target, self.assign(target, index))
            })
            .collect();
        progress.report(1.0, "Assigning ... done");

        let matched = outcomes.iter().filter(|(_, outcome)| outcome.is_matched()).count();
        tracing::info!("Assigned textures to {matched} of {total} materials");
        outcomes
    }

    fn emit<'a, S, T>(
        &self,
        target: &'a TargetItem<T>,
        set: &ChannelSet<'a, S>,
    ) -> Vec<Assignment<'a, S, T>>
    where
        'c: 'a,
    {
        set.iter()
            .map(|(channel, source)| Assignment {
                target,
                channel,
                property: self.config.property(channel),
                source,
            })
            .collect()
    }
}

/// [`AssignmentEngine::assign_all`] with the default Damerau–Levenshtein matcher
pub fn assign_all<'a, S, T>(
    targets: &'a [TargetItem<T>],
    index: &GroupIndex<'a, S>,
    config: &'a AssignConfig,
) -> Vec<(&'a TargetItem<T>, MatchOutcome<'a, S, T>)> {
    AssignmentEngine::new(config).assign_all(targets, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SuffixTable, build_index};
    use std::cell::Cell;

    #[derive(Default)]
    struct Spy {
        calls: Cell<usize>,
    }

    impl Matcher for Spy {
        fn distance(&self, a: &str, b: &str) -> usize {
            self.calls.set(self.calls.get() + 1);
            crate::damerau_levenshtein(a, b)
        }
    }

    fn hero_sources() -> Vec<SourceItem<&'static str>> {
        ["hero_o_$h", "hero_b_$h", "hero_n_$h", "sword_b_$h"]
            .into_iter()
            .map(|name| SourceItem::new(name, name))
            .collect()
    }

    fn channels<S, T>(outcome: &MatchOutcome<'_, S, T>) -> Vec<ChannelKind> {
        outcome.assignments().iter().map(|a| a.channel).collect()
    }

    #[test]
    fn test_exact_assignment_in_declaration_order() {
        let sources = hero_sources();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("Hero_mat", 0u32)];
        let config = AssignConfig::default();

        let outcomes = assign_all(&targets, &index, &config);
        assert_eq!(outcomes.len(), 1);
        let (target, outcome) = &outcomes[0];
        assert_eq!(target.name, "Hero_mat");
        assert!(matches!(outcome, MatchOutcome::AssignedExact(_)));
        assert_eq!(
            channels(outcome),
            vec![ChannelKind::Diffuse, ChannelKind::Normal, ChannelKind::Occlusion]
        );

        let first = outcome.assignments()[0];
        assert_eq!(first.property, "_MainTex");
        assert_eq!(first.source.handle, "hero_b_$h");
        assert_eq!(first.target.handle, 0);
        assert_eq!(outcome.assignments()[1].property, "_BumpMap");
    }

    #[test]
    fn test_exact_match_never_consults_matcher() {
        let sources = hero_sources();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("hero", ()), TargetItem::new("SWORD_mt", ())];
        let config = AssignConfig::default().with_aggressive_assign(3);
        let spy = Spy::default();

        let engine = AssignmentEngine::with_matcher(&config, &spy);
        let outcomes = engine.assign_all(&targets, &index);
        assert!(outcomes.iter().all(|(_, o)| matches!(o, MatchOutcome::AssignedExact(_))));
        assert_eq!(spy.calls.get(), 0);
    }

    #[test]
    fn test_fuzzy_assignment() {
        let sources = hero_sources();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("hreo", ())];
        let config = AssignConfig::default().with_aggressive_assign(3);

        let outcomes = assign_all(&targets, &index, &config);
        match &outcomes[0].1 {
            MatchOutcome::AssignedFuzzy {
                assignments,
                matched,
                distance,
            } => {
                assert_eq!(matched, "hero");
                assert_eq!(*distance, 1);
                assert_eq!(assignments.len(), 3);
            }
            other => panic!("Expected a fuzzy match, got {other:?}"),
        }
    }

    #[test]
    fn test_fuzzy_disabled_is_unmatched() {
        let sources = hero_sources();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("hreo", ())];
        let config = AssignConfig::default();
        let spy = Spy::default();

        let outcome = AssignmentEngine::with_matcher(&config, &spy).assign(&targets[0], &index);
        assert!(matches!(outcome, MatchOutcome::Unmatched { fallback: None }));
        assert_eq!(spy.calls.get(), 0);
    }

    #[test]
    fn test_threshold_boundary() {
        let sources = vec![SourceItem::new("abcdef_b_$h", ())];
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        // three substitutions away from `abcdef`
        let targets = vec![TargetItem::new("xyzdef", ())];

        let at_threshold = AssignConfig::default().with_aggressive_assign(3);
        let outcome = AssignmentEngine::new(&at_threshold).assign(&targets[0], &index);
        assert!(matches!(outcome, MatchOutcome::AssignedFuzzy { distance: 3, .. }));

        let below = AssignConfig::default().with_aggressive_assign(2);
        let outcome = AssignmentEngine::new(&below).assign(&targets[0], &index);
        assert!(matches!(outcome, MatchOutcome::Unmatched { .. }));
    }

    #[test]
    fn test_fuzzy_tie_picks_smallest_key() {
        let sources: Vec<_> = ["hat_b_$h", "bat_b_$h", "cat_b_$h"]
            .into_iter()
            .map(|name| SourceItem::new(name, ()))
            .collect();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("rat", ())];
        let config = AssignConfig::default().with_aggressive_assign(1);

        let outcome = AssignmentEngine::new(&config).assign(&targets[0], &index);
        assert!(matches!(
            outcome,
            MatchOutcome::AssignedFuzzy { ref matched, distance: 1, .. } if matched == "bat"
        ));
    }

    #[test]
    fn test_fuzzy_on_empty_index() {
        let sources: Vec<SourceItem<()>> = Vec::new();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("hero", ())];
        let config = AssignConfig::default().with_aggressive_assign(10);

        let outcome = AssignmentEngine::new(&config).assign(&targets[0], &index);
        assert!(matches!(outcome, MatchOutcome::Unmatched { fallback: None }));
    }

    #[test]
    fn test_unmatched_requests_fallback() {
        let sources = hero_sources();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![TargetItem::new("shield_mat", ())];
        let config = AssignConfig::default().with_highlight_missing(true);

        let outcome = AssignmentEngine::new(&config).assign(&targets[0], &index);
        match outcome {
            MatchOutcome::Unmatched {
                fallback: Some(request),
            } => {
                assert_eq!(request.channel, ChannelKind::Diffuse);
                assert_eq!(request.property, "_MainTex");
            }
            other => panic!("Expected a fallback request, got {other:?}"),
        }
    }

    #[test]
    fn test_outcomes_follow_input_order() {
        let sources = hero_sources();
        let index = build_index(&sources, &SuffixTable::default()).unwrap();
        let targets = vec![
            TargetItem::new("sword", 2),
            TargetItem::new("missing", 1),
            TargetItem::new("hero", 0),
        ];
        let config = AssignConfig::default();
        let mut labels = Vec::new();
        let mut progress = |_: f32, label: &str| labels.push(label.to_string());

        let outcomes = AssignmentEngine::new(&config).assign_all_with_progress(&targets, &index, &mut progress);
        let handles: Vec<_> = outcomes.iter().map(|(target, _)| target.handle).collect();
        assert_eq!(handles, vec![2, 1, 0]);
        assert!(!outcomes[1].1.is_matched());
        assert_eq!(labels.first().map(String::as_str), Some("Assigning ... sword"));
        assert_eq!(labels.len(), 4);
    }
}
