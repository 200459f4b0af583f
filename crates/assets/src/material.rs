use crate::AssetError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use stilllife_common::MaterialParams;

/// A named set of Phong surface parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub tag: String,
    pub params: MaterialParams,
}

/// Materials in definition order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_material(
        &mut self,
        tag: &str,
        diffuse: Vec3,
        specular: Vec3,
        shininess: f32,
    ) -> Result<(), AssetError> {
        if self.find_material(tag).is_some() {
            return Err(AssetError::DuplicateTag(tag.to_string()));
        }
        self.materials.push(Material {
            tag: tag.to_string(),
            params: MaterialParams {
                diffuse,
                specular,
                shininess,
            },
        });
        tracing::debug!("defined material {tag:?}");
        Ok(())
    }

    pub fn find_material(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_registered_values() {
        let mut reg = MaterialRegistry::new();
        reg.register_material("glass", Vec3::new(0.2, 0.6, 0.2), Vec3::ONE, 128.0)
            .unwrap();
        let glass = reg.find_material("glass").unwrap();
        assert_eq!(glass.params.diffuse, Vec3::new(0.2, 0.6, 0.2));
        assert_eq!(glass.params.specular, Vec3::ONE);
        assert_eq!(glass.params.shininess, 128.0);
    }

    #[test]
    fn missing_material_is_none() {
        let reg = MaterialRegistry::new();
        assert!(reg.find_material("velvet").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicate_rejected_and_first_kept() {
        let mut reg = MaterialRegistry::new();
        reg.register_material("floor", Vec3::splat(0.7), Vec3::splat(0.3), 2.0)
            .unwrap();
        let err = reg
            .register_material("floor", Vec3::ZERO, Vec3::ZERO, 1.0)
            .unwrap_err();
        assert!(matches!(err, AssetError::DuplicateTag(_)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.find_material("floor").unwrap().params.shininess, 2.0);
    }

    #[test]
    fn iteration_keeps_definition_order() {
        let mut reg = MaterialRegistry::new();
        for tag in ["b", "a", "c"] {
            reg.register_material(tag, Vec3::ONE, Vec3::ONE, 8.0).unwrap();
        }
        let tags: Vec<_> = reg.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, ["b", "a", "c"]);
    }
}
