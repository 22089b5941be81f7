//! Pattern matching, `erase`-while-iterating, and graph-scoped removal.
//!
//! Run with: cargo run --example pattern_queries

use quadstore::{GraphPattern, Model, Pattern, World};
use std::rc::Rc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let world = Rc::new(World::new());
    let model = Model::new(world.clone());

    let graph_a = world.new_uri("http://example.com/graphs/a")?;
    let graph_b = world.new_uri("http://example.com/graphs/b")?;
    let p = world.new_uri("http://example.com/p")?;

    for i in 0..5 {
        let s = world.new_uri(&format!("http://example.com/s{i}"))?;
        let o = world.new_uri(&format!("http://example.com/o{i}"))?;
        let graph = if i % 2 == 0 { &graph_a } else { &graph_b };
        model.add(s.into(), p.clone().into(), o.into(), Some(graph.clone().into()))?;
    }
    println!("total quads: {}", model.num_quads());

    // get() resolves the single wildcard slot of a pattern, here "what did s0 predicate?"
    let s0 = world.new_uri("http://example.com/s0")?;
    let pattern = Pattern {
        subject: Some(s0.into()),
        predicate: Some(p.clone().into()),
        object: None,
        graph: GraphPattern::Named(graph_a.clone().into()),
        distinct: false,
    };
    println!("s0's object: {:?}", model.get(&pattern));

    // erase() removes the quad next() just returned without invalidating the cursor.
    let mut by_predicate = model.find(Pattern {
        predicate: Some(p.clone().into()),
        ..Pattern::default()
    });
    let mut kept = 0;
    while let Some(quad) = by_predicate.next() {
        if quad.graph.as_ref() == Some(&graph_b.clone().into()) {
            by_predicate.erase();
        } else {
            kept += 1;
        }
    }
    drop(by_predicate);
    println!("quads left after erasing graph b inline: {}", model.num_quads());
    println!("quads visited that were kept: {kept}");

    // remove_graph clears everything asserted in a named graph in one call.
    let removed = model.remove_graph(Some(&graph_a.into()));
    println!("removed {removed} more quads from graph a");
    println!("quads remaining: {}", model.num_quads());

    Ok(())
}
