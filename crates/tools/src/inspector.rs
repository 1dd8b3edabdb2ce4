use bigday_assets::ShadingModel;
use bigday_scene::{DrawPlan, DrawableScene, MiffyScene, TitleWindow};
use glam::Mat4;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against a scene for debugging and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &MiffyScene) -> SceneSummary {
        SceneSummary {
            name: scene.name().to_string(),
            entry_count: scene.registry().len(),
            plan: scene.plan,
            title_window: scene.title_window,
        }
    }

    /// Describe one registry entry, with its transform at the scene's base.
    pub fn inspect(scene: &MiffyScene, name: &str) -> Option<ObjectInfo> {
        let entry = scene.registry().get(name)?;
        Some(ObjectInfo {
            name: name.to_string(),
            shape: entry.shape.to_string(),
            shading: entry.material.shading,
            color: entry.material.color.to_hex_string(),
            transform: scene.object_transform(name),
        })
    }

    /// Inspect every entry in registry order.
    pub fn list(scene: &MiffyScene) -> Vec<ObjectInfo> {
        scene
            .registry()
            .names()
            .filter_map(|name| Self::inspect(scene, name))
            .collect()
    }
}

/// Summary of a scene for the inspector.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    pub name: String,
    pub entry_count: usize,
    pub plan: DrawPlan,
    pub title_window: TitleWindow,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene {:?}: entries={} house={} background={} title={} title_window=({}, {})s",
            self.name,
            self.entry_count,
            self.plan.house,
            self.plan.background,
            self.plan.title,
            self.title_window.start_sec,
            self.title_window.end_sec,
        )
    }
}

/// Detailed info about a single registry entry.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub name: String,
    pub shape: String,
    pub shading: ShadingModel,
    pub color: String,
    /// `None` for entries that are defined but never placed.
    pub transform: Option<Mat4>,
}

impl std::fmt::Display for ObjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<13} {:<36} {:?} {}",
            self.name, self.shape, self.shading, self.color
        )?;
        match self.transform {
            Some(m) => {
                for row in 0..4 {
                    let r = m.row(row);
                    write!(
                        f,
                        "\n    [{:>8.4} {:>8.4} {:>8.4} {:>8.4}]",
                        r.x, r.y, r.z, r.w
                    )?;
                }
                Ok(())
            }
            None => write!(f, "\n    (not placed)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_default_scene() {
        let scene = MiffyScene::new();
        let summary = SceneInspector::summary(&scene);
        assert_eq!(summary.entry_count, 7);
        assert!(summary.plan.house);
        assert!(!summary.plan.background);
    }

    #[test]
    fn inspect_placed_object() {
        let scene = MiffyScene::new();
        let info = SceneInspector::inspect(&scene, "house_top").unwrap();
        assert_eq!(info.shape, "triangle");
        assert_eq!(info.color, "#d0312d");
        assert_eq!(info.transform, scene.object_transform("house_top"));
    }

    #[test]
    fn inspect_unplaced_object() {
        let scene = MiffyScene::new();
        let info = SceneInspector::inspect(&scene, "miffy").unwrap();
        assert!(info.transform.is_none());
        assert!(info.to_string().contains("not placed"));
    }

    #[test]
    fn inspect_unknown_object() {
        let scene = MiffyScene::new();
        assert!(SceneInspector::inspect(&scene, "tree").is_none());
    }

    #[test]
    fn list_covers_registry() {
        let scene = MiffyScene::new();
        let infos = SceneInspector::list(&scene);
        assert_eq!(infos.len(), 7);
        assert_eq!(infos[0].name, "grass");
    }

    #[test]
    fn summary_display() {
        let scene = MiffyScene::new();
        let s = SceneInspector::summary(&scene).to_string();
        assert!(s.contains("entries=7"));
        assert!(s.contains("background=false"));
    }
}
