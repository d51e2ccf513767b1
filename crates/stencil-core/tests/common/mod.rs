use serde::{Deserialize, Serialize};
use stencil_core::{Associated, Model, Related, Relation, Result, StencilError, TemplateEngine};

/// Network device with ordered interfaces and an optional site
///
/// `id` stands in for storage identity: `None` means the record has never
/// been saved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: Option<i64>,
    pub name: String,
    pub model: String,
    pub location: String,
    pub year: i32,
    pub interfaces: Vec<Interface>,
    pub site: Option<Site>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub code: String,
    pub city: String,
}

impl Model for Device {
    const TYPE_NAME: &'static str = "Device";

    fn relations() -> Vec<Relation> {
        vec![
            Relation::has_many::<Interface>("interfaces"),
            Relation::has_one::<Site>("site"),
        ]
    }

    fn association(&self, name: &str) -> Option<Related<'_>> {
        match name {
            "interfaces" => Some(Related::many(&self.interfaces)),
            "site" => Some(Related::optional(self.site.as_ref())),
            _ => None,
        }
    }

    fn attach(&mut self, name: &str, associated: Associated) -> Result<()> {
        match name {
            "interfaces" => self.interfaces = associated.into_many()?,
            "site" => self.site = associated.into_one()?,
            _ => {
                return Err(StencilError::UnknownAssociation {
                    type_name: Self::TYPE_NAME.to_string(),
                    association: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

impl Model for Interface {
    const TYPE_NAME: &'static str = "Interface";
}

impl Model for Site {
    const TYPE_NAME: &'static str = "Site";
}

impl Device {
    #[allow(dead_code)]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Same graph with every storage identity cleared
    #[allow(dead_code)]
    pub fn unsaved(mut self) -> Self {
        self.id = None;
        for interface in &mut self.interfaces {
            interface.id = None;
        }
        self
    }
}

impl Interface {
    #[allow(dead_code)]
    pub fn new(name: &str, address: &str, enabled: bool) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            address: address.to_string(),
            enabled,
        }
    }
}

/// Saved router with `de0` (disabled) and `lo0` (enabled)
#[allow(dead_code)]
pub fn router() -> Device {
    Device {
        id: Some(1),
        name: "router".to_string(),
        model: "MX204".to_string(),
        location: "rack 4".to_string(),
        year: 2019,
        interfaces: vec![
            Interface {
                id: Some(10),
                ..Interface::new("de0", "10.0.0.1", false)
            },
            Interface {
                id: Some(11),
                ..Interface::new("lo0", "127.0.0.1", true)
            },
        ],
        site: None,
    }
}

/// Device {name, model, location, year} + interfaces; Interface {name, address, enabled}
#[allow(dead_code)]
pub fn device_engine() -> TemplateEngine {
    let mut engine = TemplateEngine::new();
    engine
        .declare::<Device>(&["name", "model", "location", "year"], &["interfaces"])
        .declare::<Interface>(&["name", "address", "enabled"], &[]);
    engine
}

/// [`device_engine`] plus the to-one `site` association
#[allow(dead_code)]
pub fn device_engine_with_site() -> TemplateEngine {
    let mut engine = device_engine();
    engine
        .declare::<Device>(
            &["name", "model", "location", "year"],
            &["interfaces", "site"],
        )
        .declare::<Site>(&["code", "city"], &[]);
    engine
}
