//! End-to-end coverage of pattern lookup, interning, and removal across the twelve
//! maintained index orderings.

use quadstore::{GraphPattern, Model, Pattern, World};
use std::rc::Rc;

fn uri(world: &World, n: u64) -> quadstore::NamedNode {
    world
        .new_uri(&format!("http://example.com/{n}"))
        .expect("n renders to a valid absolute IRI")
}

/// Populates `model` with the scheme from scenario 1: for k = 1..=n, two quads
/// sharing (s, p) = (uri(6k-5), uri(6k-4)) with objects uri(6k-3) and uri(6k-2).
fn seed_pairs(world: &World, model: &Model, n: u64) {
    for k in 1..=n {
        let s = uri(world, 6 * k - 5);
        let p = uri(world, 6 * k - 4);
        let o1 = uri(world, 6 * k - 3);
        let o2 = uri(world, 6 * k - 2);
        assert!(model.add(s.clone().into(), p.clone().into(), o1.into(), None).unwrap());
        assert!(model.add(s.into(), p.into(), o2.into(), None).unwrap());
    }
}

#[test]
fn wildcard_and_prefix_lookups_over_seeded_pairs() {
    let world = Rc::new(World::new());
    let model = Model::with_orderings(world.clone(), &[0]).unwrap();
    seed_pairs(&world, &model, 300);

    assert_eq!(model.count(&Pattern::default()), 600);

    let s1 = uri(&world, 1);
    let p1 = uri(&world, 2);
    let by_sp = Pattern {
        subject: Some(s1.into()),
        predicate: Some(p1.clone().into()),
        ..Pattern::default()
    };
    assert_eq!(model.count(&by_sp), 2);

    let o4 = uri(&world, 4);
    let by_po = Pattern {
        predicate: Some(p1.into()),
        object: Some(o4.into()),
        ..Pattern::default()
    };
    assert_eq!(model.count(&by_po), 1);
}

#[test]
fn literal_objects_and_duplicate_insertion() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());

    let s98 = uri(&world, 98);
    let s14 = uri(&world, 14);
    let p4 = uri(&world, 4);
    let hello = world.new_literal("hello", None, None).unwrap();
    let hi = world.new_literal("hi", None, None).unwrap();
    let bonjour = world.new_literal("bonjour", None, Some("fr")).unwrap();
    let salut = world.new_literal("salut", None, Some("fr")).unwrap();

    assert!(model.add(s98.clone().into(), p4.clone().into(), hello.into(), None).unwrap());
    assert!(model.add(s98.into(), p4.clone().into(), hi.into(), None).unwrap());
    assert!(model.add(s14.clone().into(), p4.clone().into(), bonjour.into(), None).unwrap());
    assert!(model.add(s14.clone().into(), p4.clone().into(), salut.clone().into(), None).unwrap());

    // re-inserting the last quad is a no-op.
    assert!(!model.add(s14.clone().into(), p4.clone().into(), salut.into(), None).unwrap());
    assert_eq!(model.num_quads(), 4);

    let by_s14 = Pattern {
        subject: Some(s14.into()),
        predicate: Some(p4.into()),
        ..Pattern::default()
    };
    assert_eq!(model.count(&by_s14), 2);
}

#[test]
fn blank_node_subject_round_trips_by_reference() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());

    let b0 = world.new_blank("b0");
    let p4 = uri(&world, 4);
    let salut = world.new_literal("salut", None, Some("fr")).unwrap();
    model.add(b0.clone().into(), p4.into(), salut.into(), None).unwrap();

    let pattern = Pattern {
        subject: Some(b0.clone().into()),
        ..Pattern::default()
    };
    let mut results = model.find(pattern);
    let quad = results.next().expect("one quad has b0 as subject");
    assert!(results.next().is_none());
    assert_eq!(quad.subject, b0.into());
}

#[test]
fn interning_is_reference_identity() {
    let world = World::new();

    assert_eq!(
        world.new_uri("http://x").unwrap(),
        world.new_uri("http://x").unwrap()
    );
    assert_ne!(
        world.new_uri("http://x").unwrap(),
        world.new_uri("http://y").unwrap()
    );

    let ex = world.new_uri("http://x").unwrap();
    let typed = world.new_literal("hello", Some(&ex), None).unwrap();
    let tagged = world.new_literal("hello", None, Some("en")).unwrap();
    assert_ne!(typed, tagged);

    assert_eq!(
        world.new_literal("hello", Some(&ex), None).unwrap(),
        world.new_literal("hello", Some(&ex), None).unwrap()
    );
}

#[test]
fn every_single_ordering_configuration_agrees_on_results() {
    for ordering_id in 0u8..6 {
        let world = Rc::new(World::new());
        let model = Model::with_orderings(world.clone(), &[ordering_id]).unwrap();
        seed_pairs(&world, &model, 50);

        assert_eq!(model.count(&Pattern::default()), 100, "ordering {ordering_id}");

        let s1 = uri(&world, 1);
        let p1 = uri(&world, 2);
        let by_sp = Pattern {
            subject: Some(s1.into()),
            predicate: Some(p1.clone().into()),
            ..Pattern::default()
        };
        assert_eq!(model.count(&by_sp), 2, "ordering {ordering_id}");

        let b0 = world.new_blank("b0");
        let salut = world.new_literal("salut", None, Some("fr")).unwrap();
        model.add(b0.clone().into(), p1.into(), salut.into(), None).unwrap();
        let by_blank = Pattern {
            subject: Some(b0.into()),
            ..Pattern::default()
        };
        assert_eq!(model.count(&by_blank), 1, "ordering {ordering_id}");
    }
}

#[test]
fn erase_through_begin_drains_the_model() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    seed_pairs(&world, &model, 300);
    assert_eq!(model.num_quads(), 600);

    let mut iter = model.begin(&Pattern::default());
    let mut erased = 0;
    while iter.next().is_some() {
        assert!(iter.erase());
        erased += 1;
    }
    assert_eq!(erased, 600);
    assert_eq!(model.num_quads(), 0);

    let mut after = model.find(Pattern::default());
    assert!(after.next().is_none());
}

#[test]
fn add_then_remove_restores_absence_and_count() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    let s = uri(&world, 1);
    let p = uri(&world, 2);
    let o = uri(&world, 3);

    let before = model.num_quads();
    model.add(s.clone().into(), p.clone().into(), o.clone().into(), None).unwrap();
    assert!(model.remove(&s.clone().into(), &p.clone().into(), &o.clone().into(), None));
    assert!(!model.contains(&s.into(), &p.into(), &o.into(), None));
    assert_eq!(model.num_quads(), before);
}

#[test]
fn remove_of_absent_quad_is_a_silent_no_op() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    let s = uri(&world, 1);
    let p = uri(&world, 2);
    let o = uri(&world, 3);
    assert!(!model.remove(&s.into(), &p.into(), &o.into(), None));
}

#[test]
fn get_resolves_the_single_wildcard_slot() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    let s = uri(&world, 1);
    let p = uri(&world, 2);
    let o = uri(&world, 3);
    model.add(s.clone().into(), p.clone().into(), o.clone().into(), None).unwrap();

    let pattern = Pattern {
        subject: Some(s.into()),
        predicate: Some(p.into()),
        object: None,
        ..Pattern::default()
    };
    assert_eq!(model.get(&pattern), Some(o.into()));
}

#[test]
fn get_rejects_patterns_with_more_than_one_wildcard() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    assert_eq!(model.get(&Pattern::default()), None);
}

#[test]
fn remove_graph_clears_only_the_named_graph() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    let g1 = uri(&world, 1);
    let g2 = uri(&world, 2);
    let p = uri(&world, 3);
    for i in 0..4u64 {
        let s = uri(&world, 100 + i);
        let graph = if i % 2 == 0 { g1.clone() } else { g2.clone() };
        model.add(s.into(), p.clone().into(), p.clone().into(), Some(graph.into())).unwrap();
    }
    assert_eq!(model.num_quads(), 4);

    let removed = model.remove_graph(Some(&g1.into()));
    assert_eq!(removed, 2);
    assert_eq!(model.num_quads(), 2);

    let remaining = Pattern {
        graph: GraphPattern::Named(g2.into()),
        ..Pattern::default()
    };
    assert_eq!(model.count(&remaining), 2);
}

#[test]
fn distinct_collapses_the_same_triple_asserted_in_two_graphs() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    let s = uri(&world, 1);
    let p = uri(&world, 2);
    let o = uri(&world, 3);
    let g1 = uri(&world, 4);
    let g2 = uri(&world, 5);

    model.add(s.clone().into(), p.clone().into(), o.clone().into(), Some(g1.into())).unwrap();
    model.add(s.clone().into(), p.clone().into(), o.clone().into(), Some(g2.into())).unwrap();
    assert_eq!(model.num_quads(), 2);

    let pattern = Pattern {
        subject: Some(s.into()),
        predicate: Some(p.into()),
        object: Some(o.into()),
        graph: GraphPattern::Any,
        distinct: true,
    };
    let mut results = model.find(pattern);
    assert!(results.next().is_some());
    assert!(results.next().is_none());
}

#[test]
fn node_is_inline_object_matches_writer_contract() {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());
    let alice = uri(&world, 1);
    let knows = uri(&world, 2);
    let bob = uri(&world, 3);
    let age = uri(&world, 4);
    let thirty = world.new_literal("30", None, None).unwrap();

    model.add(alice.clone().into(), knows.clone().into(), bob.clone().into(), None).unwrap();
    model.add(bob.clone().into(), age.into(), thirty.into(), None).unwrap();

    // bob is both an object (of knows) and a subject (of age): not inline.
    assert!(!model.node_is_inline_object(&bob.into()));

    let blank = world.new_blank("only-an-object");
    model.add(alice.into(), knows.into(), blank.clone().into(), None).unwrap();
    assert!(model.node_is_inline_object(&blank.into()));
}
