use crate::program_state::ProgramState;
use bigday_assets::{Material, Shape};
use bigday_common::Color;
use glam::Mat4;

/// Errors raised while issuing draw calls.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("text for {name:?} is {len} chars, shape holds at most {max_chars}")]
    TextOverflow {
        name: String,
        len: usize,
        max_chars: usize,
    },
    #[error("per-frame instance budget of {limit} exceeded")]
    InstanceBudget { limit: usize },
    #[error("no object named {0:?} in the scene registry")]
    UnknownObject(String),
}

/// One object to draw: geometry, appearance and where to put it.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Registry name of the object, for logs and records.
    pub name: &'a str,
    pub shape: &'a Shape,
    pub material: &'a Material,
    pub transform: Mat4,
    /// Contents for `Shape::TextLine`; ignored by other shapes.
    pub text: Option<&'a str>,
}

/// Renderer-agnostic draw primitive.
///
/// Draw calls are synchronous from the caller's side; a backend may queue
/// the work and submit it later.
pub trait Renderer {
    fn draw(&mut self, state: &ProgramState, call: DrawCall<'_>) -> Result<(), RenderError>;
}

/// Owned copy of a draw call as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub name: String,
    pub shape: Shape,
    pub color: Color,
    pub transform: Mat4,
    pub text: Option<String>,
    pub light_count: usize,
}

/// Renderer that records draw calls instead of rasterizing them.
///
/// Useful for CLI output, logging, and testing the draw contract.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    records: Vec<DrawRecord>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Names of recorded draws in issue order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawRecord> {
        std::mem::take(&mut self.records)
    }

    /// Human-readable log of the recorded draws.
    pub fn log(&self) -> String {
        let mut out = String::new();
        for (i, r) in self.records.iter().enumerate() {
            let t = r.transform.col(3);
            out.push_str(&format!(
                "  #{i} {} [{}] color={} origin=({:.3}, {:.3}, {:.3})",
                r.name,
                r.shape,
                r.color.to_hex_string(),
                t.x,
                t.y,
                t.z
            ));
            if let Some(text) = &r.text {
                out.push_str(&format!(" text={text:?}"));
            }
            out.push('\n');
        }
        out
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, state: &ProgramState, call: DrawCall<'_>) -> Result<(), RenderError> {
        let text = match (call.shape, call.text) {
            (Shape::TextLine { max_chars }, Some(text)) => {
                let len = text.chars().count();
                if len > *max_chars {
                    return Err(RenderError::TextOverflow {
                        name: call.name.to_string(),
                        len,
                        max_chars: *max_chars,
                    });
                }
                Some(text.to_string())
            }
            _ => None,
        };
        self.records.push(DrawRecord {
            name: call.name.to_string(),
            shape: call.shape.clone(),
            color: call.material.color,
            transform: call.transform,
            text,
            light_count: state.lights.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn call<'a>(name: &'a str, shape: &'a Shape, material: &'a Material) -> DrawCall<'a> {
        DrawCall {
            name,
            shape,
            material,
            transform: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            text: None,
        }
    }

    #[test]
    fn records_in_issue_order() {
        let state = ProgramState::new();
        let material = Material::phong("m");
        let mut renderer = RecordingRenderer::new();
        renderer
            .draw(&state, call("a", &Shape::Triangle, &material))
            .unwrap();
        renderer
            .draw(&state, call("b", &Shape::Square, &material))
            .unwrap();
        assert_eq!(renderer.names(), ["a", "b"]);
        assert_eq!(renderer.records()[1].shape, Shape::Square);
    }

    #[test]
    fn text_is_kept_for_text_lines_only() {
        let state = ProgramState::new();
        let material = Material::phong("m");
        let text_shape = Shape::text_line(10);
        let mut renderer = RecordingRenderer::new();

        let mut c = call("title", &text_shape, &material);
        c.text = Some("hello");
        renderer.draw(&state, c).unwrap();

        let mut c = call("cube", &Shape::Cube, &material);
        c.text = Some("ignored");
        renderer.draw(&state, c).unwrap();

        assert_eq!(renderer.records()[0].text.as_deref(), Some("hello"));
        assert!(renderer.records()[1].text.is_none());
    }

    #[test]
    fn text_overflow_is_an_error() {
        let state = ProgramState::new();
        let material = Material::phong("m");
        let shape = Shape::text_line(3);
        let mut c = call("title", &shape, &material);
        c.text = Some("four");
        let err = RecordingRenderer::new().draw(&state, c).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TextOverflow {
                len: 4,
                max_chars: 3,
                ..
            }
        ));
    }

    #[test]
    fn log_lists_each_draw() {
        let state = ProgramState::new();
        let material = Material::phong("m").with_color(Color::hex(0xd0312d));
        let mut renderer = RecordingRenderer::new();
        renderer
            .draw(&state, call("house_top", &Shape::Triangle, &material))
            .unwrap();
        let log = renderer.log();
        assert!(log.contains("house_top"));
        assert!(log.contains("#d0312d"));
        assert!(log.contains("origin=(1.000, 2.000, 3.000)"));
    }

    #[test]
    fn take_drains_records() {
        let state = ProgramState::new();
        let material = Material::phong("m");
        let mut renderer = RecordingRenderer::new();
        renderer
            .draw(&state, call("a", &Shape::Cube, &material))
            .unwrap();
        assert_eq!(renderer.take().len(), 1);
        assert!(renderer.records().is_empty());
    }
}
