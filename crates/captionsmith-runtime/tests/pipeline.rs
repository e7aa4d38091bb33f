//! End-to-end pipeline tests: raw fragments in, description record out.

use std::sync::Arc;

use captionsmith_core::{Aspect, Aspects, SynthesisConfig};
use captionsmith_runtime::{record_digest, ReplayGenerator, Synthesizer};
use captionsmith_text::similarity;

fn noisy_generator() -> ReplayGenerator {
    ReplayGenerator::default()
        .with_fragment("caption", "a photograph of a woman walking a dog dog dog in the park")
        .with_fragment("caption", "a photograph of a woman and a dog")
        .with_fragment(
            "subject",
            "Describe the main subject of this image: a woman in a red coat holding a leash",
        )
        .with_fragment(
            "subject",
            "question: who is there? Answer: A woman in a red coat holding a leash",
        )
        .with_fragment("setting", "Describe the setting of this image: a green city park in autumn")
        .with_fragment("composition", "the the the the the")
        .with_fragment("atmosphere", "a crisp and cheerful autumn afternoon")
}

fn synthesizer() -> Synthesizer {
    let config = SynthesisConfig {
        candidates_per_prompt: 3,
        ..Default::default()
    };
    Synthesizer::new(config, Arc::new(noisy_generator()))
}

#[test]
fn test_noisy_fragments_to_record() {
    let record = synthesizer().describe(b"image").unwrap();

    assert_eq!(record.caption, "A woman walking a dog in the park.");
    assert_eq!(
        record.detailed_description,
        "This photograph captures a woman walking a dog in the park. \
         The main subject is a woman in a red coat holding a leash. \
         The setting features a green city park in autumn. \
         The atmosphere conveys a crisp and cheerful autumn afternoon."
    );
    assert!(record.has_detailed);
    assert_eq!(record.insights.subjects, vec!["person", "animal"]);
    assert_eq!(record.insights.settings, vec!["outdoor"]);
    assert_eq!(record.insights.objects, vec!["dog"]);
    assert_eq!(record.insights.mood, "neutral");
}

#[test]
fn test_deterministic_output() {
    let a = synthesizer().describe(b"image").unwrap();
    let b = synthesizer().describe(b"image").unwrap();
    assert_eq!(a, b);
    assert_eq!(record_digest(&a), record_digest(&b));
}

#[test]
fn test_no_similar_sentences_in_narrative() {
    let synth = Synthesizer::without_generator(SynthesisConfig::default());
    let aspects = Aspects::default()
        .with(Aspect::Subject, "a surfer riding a large blue wave")
        .with(Aspect::Setting, "a surfer riding a large wave at the beach")
        .with(Aspect::Atmosphere, "an energetic summer day by the ocean");
    let record = synth.synthesize("a surfer riding a large blue wave", &aspects);
    let sentences: Vec<&str> = record
        .detailed_description
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    for (i, a) in sentences.iter().enumerate() {
        for b in sentences.iter().skip(i + 1) {
            assert!(similarity(a, b) <= 0.75, "{} / {}", a, b);
        }
    }
}

#[test]
fn test_concurrent_use() {
    let synth = Arc::new(synthesizer());
    let expected = synth.describe(b"image").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let synth = Arc::clone(&synth);
            std::thread::spawn(move || synth.describe(b"image").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
