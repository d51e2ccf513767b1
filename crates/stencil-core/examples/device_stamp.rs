//! Template and stamp walkthrough
//!
//! Captures a router and its interfaces into a container, then stamps two
//! independent copies and customizes one of them.

use serde::{Deserialize, Serialize};
use stencil_core::logging_facility::{init, Profile};
use stencil_core::{
    Associated, Container, Model, Related, Relation, Result, StencilError, TemplateEngine,
    YamlCodec,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
struct Device {
    name: String,
    model: String,
    location: String,
    year: i32,
    interfaces: Vec<Interface>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
struct Interface {
    name: String,
    address: String,
    enabled: bool,
}

impl Model for Device {
    const TYPE_NAME: &'static str = "Device";

    fn relations() -> Vec<Relation> {
        vec![Relation::has_many::<Interface>("interfaces")]
    }

    fn association(&self, name: &str) -> Option<Related<'_>> {
        (name == "interfaces").then(|| Related::many(&self.interfaces))
    }

    fn attach(&mut self, name: &str, associated: Associated) -> Result<()> {
        match name {
            "interfaces" => {
                self.interfaces = associated.into_many()?;
                Ok(())
            }
            _ => Err(StencilError::UnknownAssociation {
                type_name: Self::TYPE_NAME.to_string(),
                association: name.to_string(),
            }),
        }
    }
}

impl Model for Interface {
    const TYPE_NAME: &'static str = "Interface";
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let mut engine = TemplateEngine::new().with_codec(YamlCodec);
    engine
        .declare::<Device>(&["name", "model", "location", "year"], &["interfaces"])
        .declare::<Interface>(&["name", "address", "enabled"], &[]);

    let router = Device {
        name: "router".into(),
        model: "MX204".into(),
        location: "rack 4".into(),
        year: 2019,
        interfaces: vec![
            Interface {
                name: "de0".into(),
                address: "10.0.0.1".into(),
                enabled: false,
            },
            Interface {
                name: "lo0".into(),
                address: "127.0.0.1".into(),
                enabled: true,
            },
        ],
    };

    let mut container = Container::labeled("edge router");
    container.set_origin(&engine, &router)?;
    println!(
        "Container {} holds a {} template:\n{}",
        container.id,
        container.origin_type().unwrap_or("?"),
        container.template().unwrap_or_default()
    );

    let copy: Device = container.stamp_as(&engine)?;
    println!("Stamped copy equals origin: {}", copy == router);

    let renamed: Device = container.stamp_with(&engine, |d: &mut Device| {
        d.name = "router-2".into();
        d.location = "rack 5".into();
    })?;
    println!(
        "Customized copy: {} at {} with {} interfaces",
        renamed.name,
        renamed.location,
        renamed.interfaces.len()
    );

    Ok(())
}
