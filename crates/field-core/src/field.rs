//! Particle Field
//!
//! Owns the particle set and the render loop. The host mounts it onto a
//! surface, forwards resizes, and calls [`ParticleField::on_frame`] whenever
//! a requested refresh arrives. Each frame clears the surface, joins nearby
//! pairs with faded lines, then moves and draws every particle.
//!
//! All calls happen on the host's single rendering thread; a frame runs to
//! completion before the next one is requested.

use rand::rngs::SmallRng;

use field_events::{generate_snapshot_id, FrameSnapshot, FrameStats};

use crate::config::{FieldConfig, ResizePolicy};
use crate::connections::{for_each_pair, line_opacity, pair_count};
use crate::geometry::{Bounds, Viewport};
use crate::host::{FrameHandle, FrameScheduler, Host, ListenerId, ResizeEvents};
use crate::particle::{rescale_positions, seed_particles, Particle};
use crate::surface::DrawSurface;

/// Animated particle background.
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    rng: SmallRng,
    particles: Vec<Particle>,
    /// `Some` while mounted
    viewport: Option<Viewport>,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerId>,
    /// Checked before every scheduled frame body runs
    cancelled: bool,
    frame: u64,
    last_stats: FrameStats,
}

impl ParticleField {
    pub fn new(config: FieldConfig, rng: SmallRng) -> Self {
        Self {
            config,
            rng,
            particles: Vec::new(),
            viewport: None,
            pending_frame: None,
            resize_listener: None,
            cancelled: true,
            frame: 0,
            last_stats: FrameStats::default(),
        }
    }

    /// Attaches to a surface, seeds the particles and starts the loop.
    ///
    /// Mounting an already mounted field remounts it.
    pub fn mount<H, S>(&mut self, host: &mut H, surface: &mut S, viewport: Viewport)
    where
        H: Host + ?Sized,
        S: DrawSurface + ?Sized,
    {
        if self.is_mounted() {
            self.unmount(host);
        }

        surface.resize(viewport.buffer_size(), viewport.device_pixel_ratio);
        self.viewport = Some(viewport);
        self.reseed(viewport.bounds());

        self.resize_listener = Some(host.subscribe_resize());
        self.cancelled = false;
        self.frame = 0;
        self.pending_frame = Some(host.request_frame());

        tracing::debug!(
            "Mounted particle field: {} particles ({} pairs) in {}x{} @{}x",
            self.particles.len(),
            pair_count(self.particles.len()),
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
    }

    /// Refits the surface to a new container size or density.
    ///
    /// Ignored when not mounted, so a late resize notification after
    /// [`unmount`](Self::unmount) cannot touch the surface.
    pub fn resize<S>(&mut self, surface: &mut S, viewport: Viewport)
    where
        S: DrawSurface + ?Sized,
    {
        let Some(previous) = self.viewport else {
            tracing::debug!("Ignoring resize on unmounted particle field");
            return;
        };

        surface.resize(viewport.buffer_size(), viewport.device_pixel_ratio);
        self.viewport = Some(viewport);

        let from = previous.bounds();
        let to = viewport.bounds();
        match self.config.field.resize_policy {
            ResizePolicy::Rescale if !from.is_empty() => {
                rescale_positions(&mut self.particles, from, to);
            }
            _ => self.reseed(to),
        }

        tracing::debug!(
            "Resized particle field to {}x{} @{}x",
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
    }

    /// Stops the loop and detaches from the host. Safe to call repeatedly,
    /// and before any mount.
    pub fn unmount<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.cancelled = true;
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        if let Some(id) = self.resize_listener.take() {
            host.unsubscribe_resize(id);
        }
        if self.viewport.take().is_some() {
            tracing::debug!("Unmounted particle field after {} frames", self.frame);
        }
        self.particles.clear();
    }

    /// Runs one scheduled frame and requests the next.
    ///
    /// Returns `None` without drawing when the field was unmounted or the
    /// handle is not the one it is waiting for.
    pub fn on_frame<H, S>(&mut self, handle: FrameHandle, host: &mut H, surface: &mut S) -> Option<FrameStats>
    where
        H: FrameScheduler + ?Sized,
        S: DrawSurface + ?Sized,
    {
        if self.cancelled || self.pending_frame != Some(handle) {
            return None;
        }

        let stats = self.render_frame(surface);
        self.pending_frame = Some(host.request_frame());
        Some(stats)
    }

    /// The per-frame body: clear, connect, move and draw.
    ///
    /// Lines use positions from before this frame's movement.
    pub fn render_frame<S>(&mut self, surface: &mut S) -> FrameStats
    where
        S: DrawSurface + ?Sized,
    {
        let bounds = self.bounds();
        let mut stats = FrameStats::default();

        surface.clear();

        // Nothing is visible on a zero-area buffer; pairs are still
        // evaluated and the motion keeps going
        let visible = self
            .viewport
            .map(|v| !v.buffer_size().is_empty())
            .unwrap_or(false);

        let connections = &self.config.connections;
        let palette = &self.config.palette;
        for_each_pair(&self.particles, |a, b, distance| {
            stats.pairs_evaluated += 1;
            if !visible || distance >= connections.max_distance {
                return;
            }
            let alpha = line_opacity(distance, connections.max_alpha, connections.fade_distance);
            if alpha > 0.0 {
                let style = palette.line_style(alpha, connections.line_width);
                surface.stroke_line(a.position, b.position, &style);
                stats.lines_drawn += 1;
            }
        });

        let marker = self.config.palette.particle_style();
        for particle in &mut self.particles {
            particle.update(bounds);
            if visible {
                surface.fill_circle(particle.position, particle.radius, &marker);
                stats.particles_drawn += 1;
            }
        }

        self.frame += 1;
        self.last_stats = stats;
        stats
    }

    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Logical bounds, empty when unmounted.
    pub fn bounds(&self) -> Bounds {
        self.viewport.map(|v| v.bounds()).unwrap_or_default()
    }

    /// Frames rendered since the last mount.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Handle of the frame the field is waiting on, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Captures the current state for logging or replay.
    pub fn snapshot(&self) -> FrameSnapshot {
        let viewport = self.viewport.unwrap_or(Viewport::new(0.0, 0.0, 1.0));
        FrameSnapshot {
            snapshot_id: generate_snapshot_id(self.frame),
            frame: self.frame,
            width: viewport.width,
            height: viewport.height,
            scale: viewport.device_pixel_ratio,
            particles: self
                .particles
                .iter()
                .enumerate()
                .map(|(i, p)| p.snapshot(i))
                .collect(),
            stats: self.last_stats,
        }
    }

    fn reseed(&mut self, bounds: Bounds) {
        let field = &self.config.field;
        self.particles = seed_particles(
            &mut self.rng,
            field.particle_count,
            bounds,
            field.max_speed,
            field.particle_radius,
        );
    }
}
