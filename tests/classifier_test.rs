use fixed_graph::{Cell, CharClass, Classifier, Graph, GraphError, ScoringWeights};
use proptest::prelude::*;

fn trained() -> Classifier {
    let mut classifier = Classifier::new();
    classifier.train("X", Graph::new("ab1"));
    classifier.train("X", Graph::new("ac2"));
    classifier.train("Y", Graph::new("99Z"));
    classifier
}

#[test]
fn test_template_widens_differing_positions() {
    let classifier = trained();
    let expected = Graph::from_cells([
        Cell::Literal('a'),
        Cell::Class(CharClass::ALPHA),
        Cell::Class(CharClass::DIGIT),
    ]);
    assert_eq!(classifier.template("X"), Some(&expected));
    assert_eq!(classifier.template("Y"), Some(&Graph::new("99Z")));
}

#[test]
fn test_classify_nearest_template() {
    let classifier = trained();
    let candidate = Graph::new("ab9");

    assert_eq!(classifier.template("X").unwrap().distance(&candidate), 2.0);
    assert_eq!(classifier.template("Y").unwrap().distance(&candidate), 15.0);

    let result = classifier.classify(&candidate).unwrap();
    assert_eq!(result.label, "X");
    assert_eq!(result.distance, 2.0);
    assert_eq!(Some(result.template), classifier.template("X"));
}

#[test]
fn test_classify_exact_training_record() {
    let classifier = trained();
    let result = classifier.classify(&Graph::new("99Z")).unwrap();
    assert_eq!(result.label, "Y");
    assert_eq!(result.distance, 0.0);

    let ranking = classifier.rank(&Graph::new("99Z")).unwrap();
    assert_eq!(ranking[0].label, "Y");
    assert_eq!(ranking[1].label, "X");
    assert_eq!(ranking[1].distance, 11.0);
}

#[test]
fn test_untrained_classifier_fails() {
    assert_eq!(
        Classifier::new().classify(&Graph::new("x")).unwrap_err(),
        GraphError::NoTemplates
    );
}

#[test]
fn test_weights_can_change_the_winner() {
    let mut default = Classifier::new();
    let mut lenient = Classifier::with_weights(ScoringWeights {
        length_mismatch: 0.0,
        ..ScoringWeights::default()
    });
    for classifier in [&mut default, &mut lenient] {
        classifier.train("short", Graph::new("AB"));
        classifier.train(
            "long",
            Graph::from_classes([
                CharClass::ALPHA,
                CharClass::ALPHA,
                CharClass::DIGIT,
                CharClass::DIGIT,
                CharClass::DIGIT,
            ])
            .unwrap(),
        );
    }
    let candidate = Graph::new("AB123");
    assert_eq!(default.rank(&candidate).unwrap()[0].distance, 5.0);
    assert_eq!(default.classify(&candidate).unwrap().label, "long");
    assert_eq!(lenient.classify(&candidate).unwrap().label, "short");
}

#[test]
fn test_retained_examples_follow_training_order() {
    let classifier = trained();
    let examples: Vec<String> = classifier
        .examples("X")
        .unwrap()
        .iter()
        .map(Graph::to_string)
        .collect();
    assert_eq!(examples, vec!["ab1", "ac2"]);
    assert_eq!(classifier.examples("missing"), None);
}

proptest! {
    #[test]
    fn prop_training_permutation_yields_same_templates(
        (records, shuffled) in prop::collection::vec(("[xy]", "[a-c1-3 .]{1,6}"), 1..10)
            .prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle())),
    ) {
        let mut forward = Classifier::new();
        for (label, record) in &records {
            forward.train(label.as_str(), Graph::new(record));
        }

        let mut permuted = Classifier::new();
        for (label, record) in &shuffled {
            permuted.train(label.as_str(), Graph::new(record));
        }

        for label in ["x", "y"] {
            prop_assert_eq!(forward.template(label), permuted.template(label));
        }
    }
}
