#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde::{Deserialize, Serialize};
use stencil_core::{
    Associated, EngineOptions, Model, Related, Relation, Result, StencilError, TemplateEngine,
};

/// Singly linked chain of hops
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
struct Hop {
    address: String,
    next: Option<Box<Hop>>,
}

impl Model for Hop {
    const TYPE_NAME: &'static str = "Hop";

    fn relations() -> Vec<Relation> {
        vec![Relation::has_one::<Hop>("next")]
    }

    fn association(&self, name: &str) -> Option<Related<'_>> {
        (name == "next").then(|| Related::optional(self.next.as_deref()))
    }

    fn attach(&mut self, name: &str, associated: Associated) -> Result<()> {
        if name != "next" {
            return Err(StencilError::UnknownAssociation {
                type_name: Self::TYPE_NAME.to_string(),
                association: name.to_string(),
            });
        }
        self.next = associated.into_one::<Hop>()?.map(Box::new);
        Ok(())
    }
}

/// Path of `hops` addresses; the root sits at depth 0
fn path(hops: usize) -> Hop {
    (0..hops).rev().fold(None, |next, n| {
        Some(Hop {
            address: format!("192.0.2.{n}"),
            next: next.map(Box::new),
        })
    })
    .unwrap()
}

fn engine(max_depth: Option<usize>) -> TemplateEngine {
    let mut engine = TemplateEngine::new().with_options(EngineOptions { max_depth });
    engine.declare::<Hop>(&["address"], &["next"]);
    engine
}

#[test]
fn test_unbounded_by_default() {
    let engine = engine(None);
    let origin = path(64);

    let snapshot = engine.as_template(&origin).unwrap();
    let copy: Hop = engine.from_template_as(snapshot).unwrap();
    assert_eq!(copy, origin);
}

#[test]
fn test_snapshot_within_limit() {
    // Five hops reach depth 4
    assert!(engine(Some(4)).as_template(&path(5)).is_ok());
}

#[test]
fn test_snapshot_past_limit_fails() {
    let err = engine(Some(3)).as_template(&path(5)).unwrap_err();
    assert_eq!(
        err,
        StencilError::DepthExceeded {
            type_name: "Hop".to_string(),
            max_depth: 3,
        }
    );
}

#[test]
fn test_reconstruct_past_limit_fails() {
    let snapshot = engine(None).as_template(&path(5)).unwrap();

    let err = engine(Some(2))
        .from_template_as::<Hop>(snapshot.clone())
        .unwrap_err();
    assert!(matches!(err, StencilError::DepthExceeded { max_depth: 2, .. }));

    assert!(engine(Some(4)).from_template_as::<Hop>(snapshot).is_ok());
}
