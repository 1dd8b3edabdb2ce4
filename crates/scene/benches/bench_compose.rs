use std::hint::black_box;
use std::time::Instant;

use bigday_render::{DisplayContext, ProgramState, RecordingRenderer, Scratchpad};
use bigday_scene::{DrawPlan, DrawableScene, MiffyScene};

fn bench_frames(label: &str, plan: DrawPlan, frames: usize) {
    let mut scene = MiffyScene::with_plan(plan);
    let mut renderer = RecordingRenderer::new();
    let mut scratchpad = Scratchpad::new();
    let mut state = ProgramState::new();

    let start = Instant::now();
    for _ in 0..frames {
        state.advance_clock(16.0);
        let mut ctx = DisplayContext::new(&mut renderer, &mut scratchpad, 1080, 600);
        scene
            .display(&mut ctx, black_box(&mut state))
            .expect("frame");
        black_box(renderer.take());
    }
    let elapsed = start.elapsed();
    let per_frame = elapsed / frames as u32;
    println!("  {label} ({frames} frames): {per_frame:?}/frame, total {elapsed:?}");
}

fn bench_object_transforms(iterations: usize) {
    let scene = MiffyScene::new();
    let names = ["sky", "grass", "sun", "text", "house_top", "house_bottom"];

    let start = Instant::now();
    for _ in 0..iterations {
        for name in names {
            black_box(scene.object_transform(black_box(name)));
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  object transforms ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Frame composition benchmarks ===");
    bench_frames("house only", DrawPlan::default(), 100_000);
    bench_frames(
        "everything",
        DrawPlan {
            house: true,
            background: true,
            title: true,
        },
        100_000,
    );
    bench_object_transforms(100_000);
}
