//! The barrier-synchronized worker pipeline.
//!
//! A pool of `workers` threads is built once per run. Every thread executes
//! the same sequence on its own partition of each domain:
//!
//! ```text
//! RESCALE ─► barrier ─► SAMPLE ─► barrier ─► SAMPLE_EDGE ─► barrier ─► COMPOSITE ─► barrier ─► DONE
//! ```
//!
//! Within a phase the partitions are write-disjoint, so nothing is locked.
//! The barriers make each phase's writes visible before the next one reads.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Barrier;
use std::time::{Duration, Instant};

use contour_common::{ContourError, ContourResult, Image};
use tracing::{debug, error, info};

use crate::config::PipelineConfig;
use crate::glyphs::GlyphTable;
use crate::grid::{sample_bottom_edge, sample_rows, Grid, Lattice};
use crate::march::march_partition;
use crate::partition::WorkerIndex;
use crate::rescale::{needs_rescale, rescale_partition};
use crate::shared::SharedImage;

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Rescale,
    Sample,
    SampleEdge,
    Composite,
    Done,
}

impl PipelinePhase {
    /// The state that follows `self`; `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            PipelinePhase::Rescale => PipelinePhase::Sample,
            PipelinePhase::Sample => PipelinePhase::SampleEdge,
            PipelinePhase::SampleEdge => PipelinePhase::Composite,
            PipelinePhase::Composite | PipelinePhase::Done => PipelinePhase::Done,
        }
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelinePhase::Rescale => "rescale",
            PipelinePhase::Sample => "sample",
            PipelinePhase::SampleEdge => "sample_edge",
            PipelinePhase::Composite => "composite",
            PipelinePhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything the workers share, by reference.
struct PipelineContext<'a> {
    source: &'a Image,
    working: &'a SharedImage,
    grid: &'a Grid,
    glyphs: &'a GlyphTable,
    lattice: Lattice,
    sigma: i32,
    rescale: bool,
    barrier: &'a Barrier,
}

impl PipelineContext<'_> {
    /// Rendezvous with the rest of the pool after finishing `phase`.
    fn finish(&self, worker: WorkerIndex, phase: PipelinePhase) -> PipelinePhase {
        debug!(worker = worker.id, phase = %phase, "phase complete");
        self.barrier.wait();
        phase.next()
    }
}

/// Result of one pipeline run.
pub struct ContourRun {
    /// The composited working image.
    pub image: Image,
    /// The binary lattice the glyphs were chosen from.
    pub grid: Grid,
    /// Whether the source was resampled to the target resolution.
    pub rescaled: bool,
    pub elapsed: Duration,
}

/// Parallel marching-squares contour extraction.
///
/// # Example
///
/// ```ignore
/// let glyphs = GlyphTable::new(load_glyphs("contours")?)?;
/// let pipeline = MarchingSquares::new(PipelineConfig::default(), glyphs)?;
/// let run = pipeline.run(&source)?;
/// save(&run.image)?;
/// ```
#[derive(Debug, Clone)]
pub struct MarchingSquares {
    config: PipelineConfig,
    glyphs: GlyphTable,
}

impl MarchingSquares {
    /// Validate `config` and check the glyphs match its step.
    pub fn new(config: PipelineConfig, glyphs: GlyphTable) -> ContourResult<Self> {
        config.validate()?;
        glyphs.check_step(config.step_x, config.step_y)?;
        Ok(Self { config, glyphs })
    }

    /// Run the full pipeline over `source`.
    ///
    /// All allocation and pool construction happens before any worker
    /// starts; a failure there returns an error and nothing is produced.
    pub fn run(&self, source: &Image) -> ContourResult<ContourRun> {
        let started = Instant::now();
        let config = &self.config;

        let rescale = needs_rescale(source, config.target_width, config.target_height);
        let working = if rescale {
            SharedImage::blank(config.target_width, config.target_height)?
        } else {
            SharedImage::from_image(source)?
        };

        let lattice = Lattice::new(working.width(), working.height(), config.step_x, config.step_y);
        let grid = Grid::new(lattice)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("contour-worker-{}", i))
            .build()
            .map_err(|e| ContourError::ThreadPool(e.to_string()))?;

        info!(
            source_width = source.width(),
            source_height = source.height(),
            working_width = working.width(),
            working_height = working.height(),
            lattice_rows = lattice.rows,
            lattice_cols = lattice.cols,
            workers = config.workers,
            rescale,
            "Starting contour pipeline"
        );

        let barrier = Barrier::new(config.workers);
        let context = PipelineContext {
            source,
            working: &working,
            grid: &grid,
            glyphs: &self.glyphs,
            lattice,
            sigma: config.sigma,
            rescale,
            barrier: &barrier,
        };

        pool.broadcast(|ctx| {
            let worker = WorkerIndex::new(ctx.index(), ctx.num_threads());
            if !completes(worker, || run_worker(&context, worker)) {
                // The rest of the pool is parked on the barrier and can never
                // be released.
                std::process::abort();
            }
        });

        let image = working.into_image()?;
        let elapsed = started.elapsed();

        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            width = image.width(),
            height = image.height(),
            "Contour pipeline finished"
        );

        Ok(ContourRun {
            image,
            grid,
            rescaled: rescale,
            elapsed,
        })
    }
}

/// Run `body` on behalf of `worker`, reporting whether it returned
/// without panicking.
fn completes(worker: WorkerIndex, body: impl FnOnce()) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(()) => true,
        Err(_) => {
            error!(worker = worker.id, "worker panicked, aborting");
            false
        }
    }
}

/// One worker's pass through every phase.
fn run_worker(ctx: &PipelineContext<'_>, worker: WorkerIndex) {
    let mut phase = PipelinePhase::Rescale;

    while phase != PipelinePhase::Done {
        match phase {
            PipelinePhase::Rescale => {
                if ctx.rescale {
                    rescale_partition(ctx.source, ctx.working, worker);
                }
            }
            PipelinePhase::Sample => {
                let writer = ctx.grid.rows_writer(worker.partition(ctx.lattice.rows));
                sample_rows(ctx.working, &ctx.lattice, ctx.sigma, &writer);
            }
            PipelinePhase::SampleEdge => {
                let writer = ctx
                    .grid
                    .bottom_edge_writer(worker.partition(ctx.lattice.cols), worker.is_leader());
                sample_bottom_edge(ctx.working, &ctx.lattice, ctx.sigma, &writer);
            }
            PipelinePhase::Composite => {
                march_partition(ctx.grid, ctx.glyphs, &ctx.lattice, ctx.working, worker);
            }
            PipelinePhase::Done => break,
        }
        phase = ctx.finish(worker, phase);
    }
}
