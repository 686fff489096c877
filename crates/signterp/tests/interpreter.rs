//! Tests for the interpretation state machine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use signterp::interpreter::{
    CONCATENATION_CONFIDENCE, InterpretError, RULE_MATCH_CONFIDENCE, UNRESOLVED_CONFIDENCE,
};
use signterp::{
    ConjugationTable, GrammarRule, InterpretRequest, Interpreter, LexicalCandidate,
    LexiconResolver, LookupError, Morphology, Outcome, RuleStore, Token,
};

// =============================================================================
// In-memory oracles
// =============================================================================

/// Returns exactly what it was given; unknown signs resolve to nothing.
#[derive(Default)]
struct FakeLexicon {
    entries: HashMap<String, Vec<LexicalCandidate>>,
    calls: AtomicUsize,
}

impl FakeLexicon {
    fn with(mut self, sign_id: &str, gloss: &str, pos: &str) -> Self {
        self.entries
            .entry(sign_id.to_string())
            .or_default()
            .push(LexicalCandidate::new(gloss, pos));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LexiconResolver for FakeLexicon {
    fn resolve(&self, sign_id: &str) -> Result<Vec<LexicalCandidate>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.get(sign_id).cloned().unwrap_or_default())
    }
}

/// Returns its rules in insertion order without filtering.
#[derive(Default)]
struct FakeRules {
    rules: Vec<GrammarRule>,
    calls: AtomicUsize,
}

impl FakeRules {
    fn with(mut self, rule: GrammarRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RuleStore for FakeRules {
    fn load_active_rules(&self, _locale: &str) -> Result<Vec<GrammarRule>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rules.clone())
    }
}

struct FailingLexicon;

impl LexiconResolver for FailingLexicon {
    fn resolve(&self, sign_id: &str) -> Result<Vec<LexicalCandidate>, LookupError> {
        Err(LookupError::Lexicon {
            sign_id: sign_id.to_string(),
            source: "connection refused".into(),
        })
    }
}

struct FailingRules;

impl RuleStore for FailingRules {
    fn load_active_rules(&self, locale: &str) -> Result<Vec<GrammarRule>, LookupError> {
        Err(LookupError::Rules {
            locale: locale.to_string(),
            source: "timeout".into(),
        })
    }
}

struct FailingMorphology;

impl Morphology for FailingMorphology {
    fn inflect(
        &self,
        gloss: &str,
        _conjugation: &str,
        _person: Option<u8>,
    ) -> Result<Option<String>, LookupError> {
        Err(LookupError::Morphology {
            gloss: gloss.to_string(),
            source: "table unavailable".into(),
        })
    }
}

fn spanish_lexicon() -> FakeLexicon {
    FakeLexicon::default()
        .with("YO", "YO", "PRON")
        .with("TU", "TU", "PRON")
        .with("NO", "NO", "NEG")
        .with("QUERER", "QUERER", "VERB")
        .with("PAN", "PAN", "NOUN")
        .with("DOS", "DOS", "NUM")
}

fn pron_verb_noun_rule() -> GrammarRule {
    GrammarRule::builder()
        .id(1)
        .pattern("[PRON][VERB][NOUN]")
        .template("{PRON} {VERB:conj=pres,persona=1} {NOUN}")
        .locale("es-MX".to_string())
        .weight(10)
        .build()
}

fn request(signs: &[&str]) -> InterpretRequest {
    InterpretRequest::new(signs.iter().map(|s| Token::new(*s)).collect())
}

// =============================================================================
// Empty and unresolved input
// =============================================================================

#[test]
fn empty_request_returns_empty_text_with_default_confidence() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter.interpret(&request(&[])).unwrap();

    assert_eq!(response.text, "");
    assert_eq!(response.confidence, 0.7);
    assert!(response.alternatives.is_empty());
    assert_eq!(lexicon.calls(), 0);
    assert_eq!(rules.calls(), 0);
}

#[test]
fn unresolved_signs_echo_identifiers_with_zero_confidence() {
    let lexicon = FakeLexicon::default();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter.interpret_detailed(&request(&["X1", "X2"])).unwrap();

    assert_eq!(detailed.response.text, "X1 X2");
    assert_eq!(detailed.response.confidence, UNRESOLVED_CONFIDENCE);
    assert_eq!(detailed.outcome, Outcome::Unresolved);
    assert_eq!(rules.calls(), 0);
}

#[test]
fn unresolved_tokens_are_dropped_from_the_sequence() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter
        .interpret_detailed(&request(&["YO", "???", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(detailed.response.text, "yo quiero pan");
    assert_eq!(detailed.resolved.len(), 3);
}

// =============================================================================
// Single sign
// =============================================================================

#[test]
fn single_sign_returns_normalized_gloss_with_token_confidence() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);
    let request = InterpretRequest::new(vec![
        Token::builder().sign_id("YO").confidence(0.9).build(),
    ]);

    let detailed = interpreter.interpret_detailed(&request).unwrap();

    assert_eq!(detailed.response.text, "yo");
    assert_eq!(detailed.response.confidence, 0.9);
    assert_eq!(detailed.outcome, Outcome::SingleSign);
    assert_eq!(rules.calls(), 0);
}

#[test]
fn single_sign_confidence_comes_from_the_resolved_token() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);
    let request = InterpretRequest::new(vec![
        Token::builder().sign_id("???").confidence(0.2).build(),
        Token::builder().sign_id("TU").confidence(0.65).build(),
    ]);

    let response = interpreter.interpret(&request).unwrap();

    assert_eq!(response.text, "tú");
    assert_eq!(response.confidence, 0.65);
}

#[test]
fn single_verb_is_not_inflected() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter.interpret(&request(&["QUERER"])).unwrap();

    assert_eq!(response.text, "querer");
}

#[test]
fn top_priority_candidate_is_used() {
    let lexicon = FakeLexicon::default()
        .with("COMER", "COMER", "VERB")
        .with("COMER", "COMIDA", "NOUN");
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter.interpret_detailed(&request(&["COMER"])).unwrap();

    assert_eq!(detailed.response.text, "comer");
    assert_eq!(detailed.resolved[0].pos().as_str(), "VERB");
}

// =============================================================================
// Rule matching
// =============================================================================

#[test]
fn matching_rule_renders_template() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter
        .interpret_detailed(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(detailed.response.text, "yo quiero pan");
    assert_eq!(detailed.response.confidence, RULE_MATCH_CONFIDENCE);
    assert_eq!(detailed.outcome, Outcome::RuleMatch { rule_id: 1 });
}

#[test]
fn no_matching_rule_concatenates_normalized_glosses() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter
        .interpret_detailed(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(detailed.response.text, "yo querer pan");
    assert_eq!(detailed.response.confidence, CONCATENATION_CONFIDENCE);
    assert_eq!(detailed.outcome, Outcome::Concatenated);
}

#[test]
fn partial_pattern_does_not_match() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter.interpret(&request(&["YO", "QUERER"])).unwrap();
    assert_eq!(response.text, "yo querer");
    assert_eq!(response.confidence, CONCATENATION_CONFIDENCE);

    let response = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN", "PAN"]))
        .unwrap();
    assert_eq!(response.text, "yo querer pan pan");
}

#[test]
fn first_matching_rule_in_store_order_wins() {
    let lexicon = spanish_lexicon();
    let rule = |id: u32, weight: i32, template: &str| {
        GrammarRule::builder()
            .id(id)
            .pattern("[PRON] [VERB] [NOUN]")
            .template(template)
            .weight(weight)
            .build()
    };
    // Ordering is the store's job; the interpreter does not re-sort.
    let rules = FakeRules::default()
        .with(rule(9, 5, "nine"))
        .with(rule(7, 20, "seven"))
        .with(rule(3, 20, "three"));
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter
        .interpret_detailed(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(detailed.response.text, "nine");
    assert_eq!(detailed.outcome, Outcome::RuleMatch { rule_id: 9 });
}

#[test]
fn rules_returned_for_a_broader_locale_are_used() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(
        GrammarRule::builder()
            .id(1)
            .pattern("[PRON] [VERB] [NOUN]")
            .template("{PRON} {VERB:conj=pres,persona=1} {NOUN}")
            .locale("es".to_string())
            .build(),
    );
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(response.text, "yo quiero pan");
    assert_eq!(response.confidence, RULE_MATCH_CONFIDENCE);
}

#[test]
fn tags_outside_the_well_known_set_match_rules() {
    let lexicon = FakeLexicon::default()
        .with("PUEDE", "PODER", "AUX-V")
        .with("PAN", "PAN", "NOUN")
        .with("COMIDO", "COMER", "V.PART");
    let rules = FakeRules::default()
        .with(
            GrammarRule::builder()
                .id(1)
                .pattern("[AUX-V] [NOUN]")
                .template("{AUX-V} {NOUN} ok")
                .build(),
        )
        .with(
            GrammarRule::builder()
                .id(2)
                .pattern("[AUX-V][V.PART]")
                .template("{V.PART}")
                .build(),
        );
    let morphology = ConjugationTable::new();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let detailed = interpreter
        .interpret_detailed(&request(&["PUEDE", "PAN"]))
        .unwrap();
    assert_eq!(detailed.response.text, "poder pan ok");
    assert_eq!(detailed.response.confidence, RULE_MATCH_CONFIDENCE);
    assert_eq!(detailed.outcome, Outcome::RuleMatch { rule_id: 1 });

    let detailed = interpreter
        .interpret_detailed(&request(&["PUEDE", "COMIDO"]))
        .unwrap();
    assert_eq!(detailed.response.text, "comer");
    assert_eq!(detailed.outcome, Outcome::RuleMatch { rule_id: 2 });
}

#[test]
fn higher_priority_non_matching_rules_do_not_interfere() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default()
        .with(
            GrammarRule::builder()
                .id(50)
                .pattern("[PRON] [VERB]")
                .template("wrong")
                .weight(100)
                .build(),
        )
        .with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(response.text, "yo quiero pan");
}

#[test]
fn rule_with_unparsable_pattern_is_skipped() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default()
        .with(
            GrammarRule::builder()
                .id(1)
                .pattern("PRON VERB NOUN")
                .template("broken")
                .weight(100)
                .build(),
        )
        .with(
            GrammarRule::builder()
                .id(2)
                .pattern("[PRON] [VERB] [NOUN]")
                .template("{NOUN} {PRON}")
                .build(),
        );
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(response.text, "pan yo");
}

#[test]
fn unknown_inflection_falls_back_to_gloss() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::new();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let response = interpreter
        .interpret(&request(&["TU", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(response.text, "tú querer pan");
    assert_eq!(response.confidence, RULE_MATCH_CONFIDENCE);
}

#[test]
fn builder_constructs_equivalent_interpreter() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::builder()
        .lexicon(&lexicon)
        .rules(&rules)
        .morphology(&morphology)
        .build();

    let response = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN"]))
        .unwrap();

    assert_eq!(response.text, "yo quiero pan");
}

// =============================================================================
// Lookups are not cached
// =============================================================================

#[test]
fn every_call_requeries_the_oracles() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);
    let request = request(&["YO", "QUERER", "PAN"]);

    let first = interpreter.interpret(&request).unwrap();
    let second = interpreter.interpret(&request).unwrap();

    assert_eq!(first, second);
    assert_eq!(lexicon.calls(), 6);
    assert_eq!(rules.calls(), 2);
}

#[test]
fn repeated_sign_is_resolved_each_time() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    interpreter.interpret(&request(&["PAN", "PAN", "PAN"])).unwrap();

    assert_eq!(lexicon.calls(), 3);
}

// =============================================================================
// Lookup failures propagate
// =============================================================================

#[test]
fn lexicon_failure_is_returned_not_masked() {
    let rules = FakeRules::default();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&FailingLexicon, &rules, &morphology);

    let err = interpreter.interpret(&request(&["YO"])).unwrap_err();

    match err {
        InterpretError::Lookup(LookupError::Lexicon { sign_id, .. }) => assert_eq!(sign_id, "YO"),
        other => panic!("expected lexicon failure, got {other:?}"),
    }
}

#[test]
fn rule_store_failure_is_returned_not_masked() {
    let lexicon = spanish_lexicon();
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &FailingRules, &morphology);

    let err = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN"]))
        .unwrap_err();

    assert!(matches!(
        err,
        InterpretError::Lookup(LookupError::Rules { .. })
    ));
    assert_eq!(
        err.to_string(),
        "rule lookup failed for locale 'es-MX': timeout"
    );
}

#[test]
fn morphology_failure_is_returned_not_masked() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let interpreter = Interpreter::new(&lexicon, &rules, &FailingMorphology);

    let err = interpreter
        .interpret(&request(&["YO", "QUERER", "PAN"]))
        .unwrap_err();

    assert!(matches!(
        err,
        InterpretError::Lookup(LookupError::Morphology { .. })
    ));
}

#[test]
fn failing_oracles_are_not_consulted_when_not_needed() {
    let lexicon = spanish_lexicon();
    let interpreter = Interpreter::new(&lexicon, &FailingRules, &FailingMorphology);

    // Single-sign requests never load rules or inflect.
    let response = interpreter.interpret(&request(&["PAN"])).unwrap();
    assert_eq!(response.text, "pan");

    // Empty requests never resolve.
    let interpreter = Interpreter::new(&FailingLexicon, &FailingRules, &FailingMorphology);
    assert_eq!(interpreter.interpret(&request(&[])).unwrap().text, "");
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn one_interpreter_serves_parallel_requests() {
    let lexicon = spanish_lexicon();
    let rules = FakeRules::default().with(pron_verb_noun_rule());
    let morphology = ConjugationTable::spanish();
    let interpreter = Interpreter::new(&lexicon, &rules, &morphology);

    let texts: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let interpreter = &interpreter;
                scope.spawn(move || {
                    let signs: &[&str] = if i % 2 == 0 {
                        &["YO", "QUERER", "PAN"]
                    } else {
                        &["DOS", "PAN"]
                    };
                    interpreter.interpret(&request(signs)).unwrap().text
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, text) in texts.iter().enumerate() {
        let expected = if i % 2 == 0 { "yo quiero pan" } else { "dos pan" };
        assert_eq!(text, expected);
    }
    assert_eq!(lexicon.calls(), 4 * 3 + 4 * 2);
}
