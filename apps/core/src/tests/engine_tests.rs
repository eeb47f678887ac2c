//! Engine Tests
//!
//! End-to-end behavior of `ChatEngine` on both tiers. Randomness is always
//! seeded so replies are reproducible.

use std::sync::Arc;

use crate::brain::selector::ResponseSource;
use crate::brain::suggestions::SuggestionSet;
use crate::brain::{ChatEngine, EntityTag, Intent, SeededRandom, FALLBACK_RESPONSE};
use crate::config::EngineConfig;

fn standard() -> ChatEngine {
    ChatEngine::with_random(EngineConfig::standard(), Arc::new(SeededRandom::new(11)))
}

fn fast() -> ChatEngine {
    ChatEngine::with_random(EngineConfig::fast(), Arc::new(SeededRandom::new(11)))
}

#[cfg(test)]
mod classify_tests {
    use super::*;

    #[test]
    fn test_hello_cost_example() {
        let engine = standard();
        let reply = engine.classify("Hello, how much does it cost?");

        assert_eq!(reply.intent, Intent::Greeting);
        // 0.9 × (0.7 + 0.3 × 6/10)
        assert!((reply.confidence - 0.792).abs() < 1e-9);
        assert!(engine
            .bank()
            .responses_for_intent(Intent::Greeting)
            .contains(&reply.response));
    }

    #[test]
    fn test_greeting_priority_over_pricing() {
        for engine in [standard(), fast()] {
            assert_eq!(engine.classify("hello, what is your price").intent, Intent::Greeting);
        }
    }

    #[test]
    fn test_stopword_only_message_has_floor_confidence() {
        let engine = standard();
        for text in ["the and is it", "", "   ", "it is to be"] {
            assert!(engine.keywords(text).is_empty(), "'{}'", text);
            assert_eq!(engine.classify(text).confidence, 0.3, "'{}'", text);
        }
    }

    #[test]
    fn test_nonsense_gets_fallback() {
        let engine = standard();
        let reply = engine.classify("xyzzy plugh");

        assert_eq!(reply.intent, Intent::General);
        assert_eq!(reply.response, FALLBACK_RESPONSE);
        assert_eq!(reply.source, ResponseSource::Fallback);
    }

    #[test]
    fn test_question_answered_from_pattern_table() {
        let engine = standard();
        let reply = engine.classify("What can you do?");

        assert_eq!(reply.intent, Intent::Question);
        match &reply.source {
            ResponseSource::Pattern { pattern, similarity } => {
                assert_eq!(pattern, "what can you do");
                assert!(*similarity > 0.3);
            }
            other => panic!("expected pattern source, got {:?}", other),
        }
        assert!(engine
            .bank()
            .responses_for_pattern("what can you do")
            .contains(&reply.response));
    }

    #[test]
    fn test_fast_tier_never_falls_back() {
        let engine = fast();
        for text in ["xyzzy plugh", "", "Where is the office?", "thanks!"] {
            let reply = engine.classify(text);
            assert_eq!(reply.source, ResponseSource::Intent, "'{}'", text);
            assert!((0.7..=0.99).contains(&reply.confidence));
        }
        assert_eq!(engine.classify("Where is the office?").intent, Intent::Question);
    }

    #[test]
    fn test_confidence_always_in_unit_range() {
        let long = "please ".repeat(40);
        for engine in [standard(), fast()] {
            for text in ["hi", "pricing for a team of ten people please", long.as_str()] {
                let confidence = engine.classify(text).confidence;
                assert!((0.0..=1.0).contains(&confidence));
            }
        }
    }

    #[test]
    fn test_same_seed_same_replies() {
        let a = standard();
        let b = standard();
        let messages = ["hello", "bye", "thanks", "help", "what does it cost"];

        for _ in 0..5 {
            for text in messages {
                assert_eq!(a.classify(text).response, b.classify(text).response);
            }
        }
    }
}

#[cfg(test)]
mod suggest_tests {
    use super::*;

    #[test]
    fn test_short_input_gets_starters() {
        let engine = standard();
        assert_eq!(engine.suggest("a"), SuggestionSet::Standard.starters());
        assert_eq!(engine.suggest(""), SuggestionSet::Standard.starters());
        assert_eq!(engine.suggest("a").len(), 4);
    }

    #[test]
    fn test_greeting_suggestions() {
        let engine = standard();
        assert_eq!(
            engine.suggest("hi there"),
            SuggestionSet::Standard.for_intent(Intent::Greeting)
        );
        assert_ne!(engine.suggest("hi there"), engine.suggest("a"));
    }

    #[test]
    fn test_per_intent_lists() {
        let engine = standard();
        assert_eq!(engine.suggest("need help"), SuggestionSet::Standard.for_intent(Intent::Help));
        assert_eq!(engine.suggest("price"), SuggestionSet::Standard.for_intent(Intent::Pricing));
        assert_eq!(
            engine.suggest("blue sky"),
            SuggestionSet::Standard.for_intent(Intent::General)
        );
    }

    #[test]
    fn test_fast_tier_lists() {
        let engine = fast();
        assert_eq!(engine.suggest("?"), SuggestionSet::Compact.starters());
        assert_eq!(engine.suggest("hey"), SuggestionSet::Compact.for_intent(Intent::Greeting));
    }
}

#[cfg(test)]
mod bank_update_tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_add_intent_response_keeps_prior_entries() {
        let engine = standard();
        let before = engine.bank().responses_for_intent(Intent::Help);

        engine.add_intent_response(Intent::Help, "X");
        let after = engine.bank().responses_for_intent(Intent::Help);

        assert!(after.contains(&"X".to_string()));
        assert!(before.iter().all(|r| after.contains(r)));
        assert_eq!(after.len(), before.len() + 1);
    }

    #[test]
    fn test_new_intent_list_takes_over_from_fallback() {
        let engine = standard();
        assert_eq!(engine.classify("xyzzy").response, FALLBACK_RESPONSE);

        engine.add_intent_response(Intent::General, "Could you tell me a bit more?");
        let reply = engine.classify("xyzzy");
        assert_eq!(reply.response, "Could you tell me a bit more?");
        assert_eq!(reply.source, ResponseSource::Intent);
    }

    #[test]
    fn test_taught_pattern_is_matched() {
        let engine = standard();
        engine.add_pattern("Opening Hours", "We are open from 9 to 5.");

        let reply = engine.classify("opening hours");
        assert_eq!(reply.response, "We are open from 9 to 5.");
        assert_eq!(
            reply.source,
            ResponseSource::Pattern {
                pattern: "opening hours".to_string(),
                similarity: 1.0,
            }
        );
    }

    #[test]
    fn test_concurrent_classify_and_teach() {
        let engine = Arc::new(standard());
        let mut handles = Vec::new();

        for worker in 0..4 {
            let engine = Arc::clone(&engine);
            handles.push(thread::spawn(move || {
                for i in 0..25 {
                    let reply = engine.classify("need some help");
                    assert_eq!(reply.intent, Intent::Help);
                    assert!(!reply.response.is_empty());
                    engine.add_intent_response(Intent::Help, &format!("helper {}-{}", worker, i));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(engine.bank().responses_for_intent(Intent::Help).len(), 4 + 100);
    }
}

#[cfg(test)]
mod entity_tests {
    use super::*;

    #[test]
    fn test_entities_through_engine() {
        let engine = standard();
        assert_eq!(
            engine.extract_entities("reach me at a.b@c.org or 555-000-1234"),
            vec![EntityTag::Email, EntityTag::Phone, EntityTag::Number]
        );
        assert!(engine.extract_entities("no entities here").is_empty());
    }
}
