use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use stencil_core::{Associated, Model, Related, Relation, Result, StencilError, TemplateEngine};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub name: String,
    pub model: String,
    pub location: String,
    pub year: i32,
    pub interfaces: Vec<Interface>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub name: String,
    pub address: String,
    pub enabled: bool,
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
        if name != "interfaces" {
            return Err(StencilError::UnknownAssociation {
                type_name: Self::TYPE_NAME.to_string(),
                association: name.to_string(),
            });
        }
        self.interfaces = associated.into_many()?;
        Ok(())
    }
}

impl Model for Interface {
    const TYPE_NAME: &'static str = "Interface";
}

pub fn setup_test_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    stencil_store::migrations::apply_migrations(&mut conn).unwrap();
    conn
}

pub fn engine() -> TemplateEngine {
    let mut engine = TemplateEngine::new();
    engine
        .declare::<Device>(&["name", "model", "location", "year"], &["interfaces"])
        .declare::<Interface>(&["name", "address", "enabled"], &[]);
    engine
}

pub fn router() -> Device {
    Device {
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
    }
}
