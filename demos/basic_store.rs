//! Interning terms through a `World` and asserting them into a `Model`.
//!
//! Run with: cargo run --example basic_store

use quadstore::{GraphPattern, Model, Pattern, World};
use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());

    let alice = world.new_uri("http://example.com/alice")?;
    let bob = world.new_uri("http://example.com/bob")?;
    let knows = world.new_uri("http://example.com/knows")?;
    let name = world.new_uri("http://example.com/name")?;
    let alice_name = world.new_literal("Alice", None, None)?;
    let bob_name_fr = world.new_literal("Bob", None, Some("fr"))?;

    model.add(alice.clone().into(), knows.clone().into(), bob.clone().into(), None)?;
    model.add(alice.clone().into(), name.clone().into(), alice_name.into(), None)?;
    model.add(bob.clone().into(), name.clone().into(), bob_name_fr.into(), None)?;

    println!("quads stored: {}", model.num_quads());

    // Interning means the same lexical form always resolves to the same node.
    let alice_again = world.new_uri("http://example.com/alice")?;
    println!("interning holds: {}", alice == alice_again);

    // find() with wildcards everywhere except subject returns every fact about Alice.
    let pattern = Pattern {
        subject: Some(alice.clone().into()),
        ..Pattern::default()
    };
    for quad in model.find(pattern) {
        println!("{quad}");
    }

    // remove + re-add is idempotent with respect to num_quads.
    let before = model.num_quads();
    model.remove(&alice.into(), &knows.into(), &bob.into(), None);
    assert_eq!(model.num_quads(), before - 1);

    let empty_graph = Pattern {
        graph: GraphPattern::DefaultGraph,
        ..Pattern::default()
    };
    println!("still in the default graph: {}", model.count(&empty_graph));

    Ok(())
}
