use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use super::score::{Accuracy, exact_match, length_match};
use super::search::{MaskCandidate, VocabMask, choose_best, restrict_and_argmax};
use super::{MaskedLanguageModel, PaddedBatch, ProbeConfig, ProbeError, Tokenizer};
use crate::error::LoadError;
use crate::prompt::Prompt;
use crate::types::Fact;

/// Facts excluded before probing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    /// A label contains a token the model does not know.
    pub unknown_token: usize,
    /// Multi-word objects, with `skip_multi_word` set.
    pub multi_word: usize,
}

/// What happened to one probed fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactOutcome {
    pub sub_uri: String,
    pub obj_uri: String,
    /// Mask count the model was most confident with.
    pub num_mask: usize,
    /// Tokens of the winning model input.
    pub input: Vec<String>,
    pub predicted: Vec<String>,
    /// Tokens of the inflected gold label.
    pub gold: Vec<String>,
    pub exact: bool,
    pub length: bool,
    /// Exact match against the dictionary form of the object label.
    pub dictionary_exact: bool,
}

/// Results of probing one relation with one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationReport {
    pub relation: String,
    pub template: String,
    pub skipped: SkipCounts,
    pub accuracy: Accuracy,
    pub length_accuracy: Accuracy,
    /// Accuracy against uninflected object labels.
    pub dictionary_accuracy: Accuracy,
    /// Probed facts, in input order.
    pub outcomes: Vec<FactOutcome>,
}

impl RelationReport {
    /// Writes `<dir>/<relation>.txt` with one `input<TAB>predicted<TAB>gold`
    /// line per probed fact, tokens joined by spaces. Creates `dir` if needed
    /// and returns the path written.
    pub fn write_prediction_log(&self, dir: &Path) -> Result<PathBuf, LoadError> {
        let path = dir.join(format!("{}.txt", self.relation));
        let write_error = |source| LoadError::Write {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(dir).map_err(write_error)?;

        let log: String = self
            .outcomes
            .iter()
            .map(|outcome| {
                format!(
                    "{}\t{}\t{}\n",
                    outcome.input.join(" ").trim(),
                    outcome.predicted.join(" "),
                    outcome.gold.join(" ")
                )
            })
            .collect();
        fs::write(&path, log).map_err(write_error)?;
        Ok(path)
    }
}

/// Results of probing one relation with several alternative templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnsembleReport {
    pub relation: String,
    pub reports: Vec<RelationReport>,
    /// A fact counts as correct if any template got it right.
    pub oracle: Accuracy,
}

/// A relation to probe: its template and facts.
#[derive(Debug, Clone)]
pub struct RelationJob {
    pub relation: String,
    pub template: String,
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationFailure {
    pub relation: String,
    pub error: String,
}

/// Results of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeSummary {
    pub reports: Vec<RelationReport>,
    pub failures: Vec<RelationFailure>,
    /// Exact-match accuracy over all facts of all successful relations.
    pub overall: Accuracy,
    pub overall_length: Accuracy,
}

/// A fact ready for the model: rendered once per mask count.
struct PreparedFact<'f> {
    fact: &'f Fact,
    /// Model input ids for 1..=max_mask masks.
    inputs: Vec<Vec<u32>>,
    gold_ids: Vec<u32>,
    dictionary_ids: Vec<u32>,
}

/// Runs cloze probes of a masked language model.
pub struct Prober<'a> {
    prompt: &'a Prompt,
    tokenizer: &'a dyn Tokenizer,
    model: &'a dyn MaskedLanguageModel,
    config: &'a ProbeConfig,
    restricted: VocabMask,
}

impl<'a> Prober<'a> {
    pub fn new(
        prompt: &'a Prompt,
        tokenizer: &'a dyn Tokenizer,
        model: &'a dyn MaskedLanguageModel,
        config: &'a ProbeConfig,
    ) -> Self {
        Self {
            prompt,
            tokenizer,
            model,
            config,
            restricted: VocabMask::new(&config.restricted_vocab),
        }
    }

    /// Probes every fact of a relation with `template`.
    ///
    /// Facts whose labels contain unknown tokens are skipped, as are
    /// multi-word objects when configured. Any render or model error aborts
    /// the relation.
    pub fn probe_relation(
        &self,
        relation: &str,
        template: &str,
        facts: &[Fact],
    ) -> Result<RelationReport, ProbeError> {
        if self.config.max_mask == 0 {
            return Err(ProbeError::InvalidConfig {
                message: "max_mask must be at least 1".to_string(),
            });
        }

        let mut report = RelationReport {
            relation: relation.to_string(),
            template: template.to_string(),
            skipped: SkipCounts::default(),
            accuracy: Accuracy::default(),
            length_accuracy: Accuracy::default(),
            dictionary_accuracy: Accuracy::default(),
            outcomes: Vec::new(),
        };

        let queries: Vec<&Fact> = facts
            .iter()
            .filter(|fact| self.keep(relation, fact, &mut report.skipped))
            .collect();

        for batch in queries.chunks(self.config.batch_size.max(1)) {
            let prepared = batch
                .iter()
                .map(|fact| self.prepare(relation, template, fact))
                .collect::<Result<Vec<_>, _>>()?;
            for outcome in self.score_batch(&prepared)? {
                report.accuracy.record(outcome.exact);
                report.length_accuracy.record(outcome.length);
                report.dictionary_accuracy.record(outcome.dictionary_exact);
                report.outcomes.push(outcome);
            }
        }

        info!(
            relation,
            facts = report.outcomes.len(),
            unknown_token = report.skipped.unknown_token,
            multi_word = report.skipped.multi_word,
            accuracy = %report.accuracy,
            length_accuracy = %report.length_accuracy,
            "probed relation"
        );
        Ok(report)
    }

    /// Probes a relation with each alternative template and computes the
    /// oracle accuracy over them.
    pub fn probe_templates(
        &self,
        relation: &str,
        templates: &[String],
        facts: &[Fact],
    ) -> Result<EnsembleReport, ProbeError> {
        let reports = templates
            .iter()
            .map(|template| self.probe_relation(relation, template, facts))
            .collect::<Result<Vec<_>, _>>()?;

        // Skips do not depend on the template, so outcomes line up by index.
        let facts_probed = reports.first().map_or(0, |report| report.outcomes.len());
        let mut oracle = Accuracy::default();
        for index in 0..facts_probed {
            oracle.record(
                reports
                    .iter()
                    .any(|report| report.outcomes.get(index).is_some_and(|o| o.exact)),
            );
        }

        Ok(EnsembleReport {
            relation: relation.to_string(),
            reports,
            oracle,
        })
    }

    /// Probes each relation in turn. A failing relation is logged and
    /// recorded; the run continues with the next one.
    pub fn probe_all(&self, jobs: &[RelationJob]) -> ProbeSummary {
        let mut summary = ProbeSummary::default();
        for job in jobs {
            match self.probe_relation(&job.relation, &job.template, &job.facts) {
                Ok(report) => {
                    summary.overall.merge(report.accuracy);
                    summary.overall_length.merge(report.length_accuracy);
                    summary.reports.push(report);
                }
                Err(e) => {
                    error!(relation = %job.relation, error = %e, "failed to probe relation");
                    summary.failures.push(RelationFailure {
                        relation: job.relation.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        summary
    }

    fn keep(&self, relation: &str, fact: &Fact, skipped: &mut SkipCounts) -> bool {
        let unk = self.tokenizer.unk_id();
        if self.tokenizer.ids(&fact.sub_label).contains(&unk)
            || self.tokenizer.ids(&fact.obj_label).contains(&unk)
        {
            warn!(relation, sub_uri = %fact.sub_uri, obj_uri = %fact.obj_uri, "label has unknown tokens");
            skipped.unknown_token += 1;
            return false;
        }
        if self.config.skip_multi_word && fact.obj_label.contains(' ') {
            skipped.multi_word += 1;
            return false;
        }
        true
    }

    fn model_text(&self, text: &str) -> String {
        if self.config.normalize {
            self.prompt.normalize(text, &self.config.mask_symbol)
        } else {
            text.to_string()
        }
    }

    fn prepare<'f>(
        &self,
        relation: &str,
        template: &str,
        fact: &'f Fact,
    ) -> Result<PreparedFact<'f>, ProbeError> {
        let with_subject =
            self.prompt
                .fill_x(template, &fact.sub_uri, &fact.sub_label, fact.sub_gender)?;

        let mut inputs = Vec::with_capacity(self.config.max_mask);
        let mut gold = fact.obj_label.clone();
        for num_mask in 1..=self.config.max_mask {
            let rendered = self.prompt.fill_y(
                &with_subject.text,
                &fact.obj_uri,
                &fact.obj_label,
                fact.obj_gender,
                num_mask,
                &self.config.mask_symbol,
            )?;
            inputs.push(self.tokenizer.encode(&self.model_text(&rendered.text)));
            gold = rendered.label;
        }

        let gold_ids = self.tokenizer.ids(&self.model_text(&gold));
        if gold_ids.len() > self.config.max_mask {
            warn!(
                relation,
                gold = %gold,
                tokens = gold_ids.len(),
                max_mask = self.config.max_mask,
                "gold object needs more tokens than the maximum mask count"
            );
        }
        let dictionary_ids = self.tokenizer.ids(&self.model_text(&fact.obj_label));

        Ok(PreparedFact {
            fact,
            inputs,
            gold_ids,
            dictionary_ids,
        })
    }

    fn score_batch(&self, prepared: &[PreparedFact<'_>]) -> Result<Vec<FactOutcome>, ProbeError> {
        let sequences: Vec<Vec<u32>> = prepared
            .iter()
            .flat_map(|fact| fact.inputs.iter().cloned())
            .collect();
        if sequences.is_empty() {
            return Ok(Vec::new());
        }

        let batch = PaddedBatch::pad(&sequences, self.tokenizer.pad_id());
        let scores = self.model.log_probs(&batch)?;
        if scores.is_empty() {
            return Err(ProbeError::EmptyBatch {
                sequences: sequences.len(),
            });
        }
        if scores.len() != sequences.len() {
            return Err(ProbeError::ShapeMismatch {
                what: "sequences",
                expected: sequences.len(),
                actual: scores.len(),
            });
        }

        let mask_id = self.tokenizer.mask_id();
        let mut rows = sequences.into_iter().zip(scores);
        let mut outcomes = Vec::with_capacity(prepared.len());
        for fact in prepared {
            let mut candidates = Vec::with_capacity(fact.inputs.len());
            for (num_mask, (input_ids, sequence_scores)) in
                (1..=fact.inputs.len()).zip(rows.by_ref())
            {
                let mut predictions = Vec::new();
                let positions = input_ids
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| **id == mask_id)
                    .map(|(position, _)| position);
                for position in positions {
                    let Some(position_scores) = sequence_scores.get(position) else {
                        return Err(ProbeError::ShapeMismatch {
                            what: "positions",
                            expected: input_ids.len(),
                            actual: sequence_scores.len(),
                        });
                    };
                    predictions.extend(restrict_and_argmax(
                        position_scores,
                        &self.restricted,
                    ));
                }
                candidates.push(MaskCandidate {
                    num_mask,
                    input_ids,
                    predictions,
                });
            }

            let Some(best) = choose_best(&candidates) else {
                let input = candidates
                    .first()
                    .map(|candidate| self.tokens(&candidate.input_ids).join(" "))
                    .unwrap_or_default();
                return Err(ProbeError::MissingMask { input });
            };
            outcomes.push(self.outcome(fact, best));
        }
        Ok(outcomes)
    }

    fn outcome(&self, prepared: &PreparedFact<'_>, best: &MaskCandidate) -> FactOutcome {
        let predicted = best.predicted_ids();
        FactOutcome {
            sub_uri: prepared.fact.sub_uri.clone(),
            obj_uri: prepared.fact.obj_uri.clone(),
            num_mask: best.num_mask,
            input: self.tokens(&best.input_ids),
            predicted: self.tokens(&predicted),
            gold: self.tokens(&prepared.gold_ids),
            exact: exact_match(&predicted, &prepared.gold_ids),
            length: length_match(&predicted, &prepared.gold_ids),
            dictionary_exact: exact_match(&predicted, &prepared.dictionary_ids),
        }
    }

    fn tokens(&self, ids: &[u32]) -> Vec<String> {
        ids.iter().map(|&id| self.tokenizer.id_to_token(id)).collect()
    }
}
