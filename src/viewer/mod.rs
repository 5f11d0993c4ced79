//! # Viewer State
//!
//! Everything the viewer UI reads and toggles, held in one explicit value
//! owned by the host: the model list, the current model's pivot, camera,
//! display toggles, status line and debug report.
//!
//! ## Loading
//!
//! Every load request gets a [`LoadTicket`]. When a load completes it is
//! installed only if no newer request was issued in the meantime; otherwise
//! the result is released and dropped (last load wins). Installing a model
//! releases the previous pivot, frames the new one and points the camera at
//! it.
//!
//! ```no_run
//! use autoframe::config::ViewerConfig;
//! use autoframe::loader::ObjLoader;
//! use autoframe::viewer::ViewerState;
//!
//! let mut viewer = ViewerState::new(ViewerConfig::default());
//! viewer.load_manifest("site/models/models.json");
//!
//! let loader = ObjLoader::new("site");
//! viewer.load_blocking(&loader, 0);
//! println!("{}", viewer.status());
//! ```

mod loading;
mod report;

pub use loading::{LoadOutcome, LoadSequencer, LoadState, LoadTicket};
pub use report::{DebugReport, DownloadLink};

use std::{path::Path, task::Poll};

use cgmath::Deg;

use crate::{
    config::ViewerConfig,
    error::{LoadError, ManifestError},
    gfx::{
        bounds::BoundingBox,
        camera::{CameraPreset, OrbitCamera, Projection},
        framing::{self, placement_for_bounds, CameraPlacement},
        scene::{Pivot, SceneNode, ShadingMode},
    },
    loader::ModelLoader,
    manifest::{ModelEntry, ModelManifest},
};

use loading::InFlight;

/// Shown in the model list when there is nothing to pick from
pub const EMPTY_MANIFEST_HINT: &str =
    "No models found. Add OBJ files to the models/ folder and run the generator.";

const MAX_LIGHT_INTENSITY: f32 = 2.0;

/// Viewer state owned by the host application
pub struct ViewerState {
    pub config: ViewerConfig,
    pub camera: OrbitCamera,
    manifest: ModelManifest,
    manifest_hint: Option<String>,
    selected: Option<usize>,
    pivot: Option<Pivot>,
    sequencer: LoadSequencer,
    in_flight: Vec<InFlight>,
    load_state: LoadState,
    wireframe: bool,
    shading: ShadingMode,
    grid_visible: bool,
    light_intensity: f32,
    status: String,
    debug_report: Option<DebugReport>,
    download_link: Option<DownloadLink>,
}

impl ViewerState {
    pub fn new(config: ViewerConfig) -> Self {
        let mut camera = OrbitCamera::default();
        camera.fovy = Deg(config.camera.fovy_degrees).into();
        camera.frustum_size = config.camera.ortho_frustum_size;
        camera.bounds.min_distance = config.camera.min_distance;
        camera.bounds.max_distance = config.camera.max_distance;

        Self {
            camera,
            manifest: ModelManifest::default(),
            manifest_hint: None,
            selected: None,
            pivot: None,
            sequencer: LoadSequencer::default(),
            in_flight: Vec::new(),
            load_state: LoadState::Idle,
            wireframe: false,
            shading: config.shading,
            grid_visible: config.show_grid,
            light_intensity: config.light_intensity.clamp(0.0, MAX_LIGHT_INTENSITY),
            status: String::new(),
            debug_report: None,
            download_link: None,
            config,
        }
    }

    // Model list

    /// Read the model list; a missing or invalid manifest leaves an empty
    /// list with a hint instead of failing
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        log::info!("Reading model list from {}", path.display());
        self.set_manifest(ModelManifest::load(path));
    }

    pub fn set_manifest(&mut self, manifest: Result<ModelManifest, ManifestError>) {
        self.selected = None;
        match manifest {
            Ok(manifest) if !manifest.is_empty() => {
                log::info!("{} model(s) available", manifest.len());
                self.manifest = manifest;
                self.manifest_hint = None;
            }
            Ok(_) => {
                self.manifest = ModelManifest::default();
                self.manifest_hint = Some(EMPTY_MANIFEST_HINT.to_string());
            }
            Err(err) => {
                log::warn!("Model list unavailable: {}", err);
                self.manifest = ModelManifest::default();
                self.manifest_hint = Some(EMPTY_MANIFEST_HINT.to_string());
                self.status = "No models available".to_string();
            }
        }
    }

    pub fn manifest(&self) -> &ModelManifest {
        &self.manifest
    }

    /// Empty-state message for the model list, if it is empty
    pub fn empty_state_hint(&self) -> Option<&str> {
        self.manifest_hint.as_deref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Pick a model from the list; returns the entry to load
    pub fn select_model(&mut self, index: usize) -> Option<ModelEntry> {
        let entry = self.manifest.get(index)?.clone();
        self.selected = Some(index);
        Some(entry)
    }

    /// Select the following model, wrapping around
    pub fn next_model(&mut self) -> Option<ModelEntry> {
        let len = self.manifest.len();
        if len == 0 {
            return None;
        }
        let index = self.selected.map_or(0, |i| (i + 1) % len);
        self.select_model(index)
    }

    /// Select the preceding model, wrapping around
    pub fn previous_model(&mut self) -> Option<ModelEntry> {
        let len = self.manifest.len();
        if len == 0 {
            return None;
        }
        let index = self.selected.map_or(len - 1, |i| (i + len - 1) % len);
        self.select_model(index)
    }

    // Loading

    /// Issue a ticket for loading `entry`; any earlier request is superseded
    pub fn begin_load(&mut self, entry: &ModelEntry) -> LoadTicket {
        let ticket = self.sequencer.issue(&entry.name, &entry.url);
        log::info!("Loading {} from {} (#{})", entry.name, entry.url, ticket.sequence);
        self.status = format!("Loading {} ...", entry.name);
        self.load_state = LoadState::Pending {
            name: entry.name.clone(),
        };
        ticket
    }

    /// Start loading list entry `index` without waiting for it
    ///
    /// Loads started earlier and still running are dropped. The result is
    /// picked up by [`poll_loads`](Self::poll_loads).
    pub fn start_load(&mut self, loader: &dyn ModelLoader, index: usize) -> Option<LoadTicket> {
        let entry = self.select_model(index)?;
        let ticket = self.begin_load(&entry);
        let superseded = self.in_flight.len();
        self.in_flight.clear();
        if superseded > 0 {
            log::debug!("Dropped {} superseded load(s)", superseded);
        }
        let future = loader.load(&entry.url);
        self.in_flight.push(InFlight::new(ticket.clone(), future));
        Some(ticket)
    }

    /// Poll started loads once and install the ones that finished
    pub fn poll_loads(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        let mut still_running = Vec::new();

        for mut load in std::mem::take(&mut self.in_flight) {
            match load.poll_once() {
                Poll::Ready(result) => {
                    let (ticket, _) = load.into_parts();
                    outcomes.push(self.install_model(&ticket, result));
                }
                Poll::Pending => still_running.push(load),
            }
        }

        self.in_flight = still_running;
        outcomes
    }

    /// Load list entry `index` and install it
    pub async fn load(&mut self, loader: &dyn ModelLoader, index: usize) -> Option<LoadOutcome> {
        let entry = self.select_model(index)?;
        let ticket = self.begin_load(&entry);
        let result = loader.load(&entry.url).await;
        Some(self.install_model(&ticket, result))
    }

    /// Blocking variant of [`load`](Self::load)
    pub fn load_blocking(&mut self, loader: &dyn ModelLoader, index: usize) -> Option<LoadOutcome> {
        pollster::block_on(self.load(loader, index))
    }

    /// Apply a completed load
    ///
    /// Stale tickets are discarded and their model released. Failures only
    /// update the status line. A successful load replaces the current pivot,
    /// is framed, and moves the camera.
    pub fn install_model(
        &mut self,
        ticket: &LoadTicket,
        result: Result<SceneNode, LoadError>,
    ) -> LoadOutcome {
        if !self.sequencer.is_current(ticket) {
            log::warn!(
                "Discarding {} (#{}), a newer load was requested",
                ticket.name,
                ticket.sequence
            );
            if let Ok(mut model) = result {
                model.release();
            }
            return LoadOutcome::Discarded;
        }

        let model = match result {
            Ok(model) => model,
            Err(err) => {
                log::error!("Failed to load {}: {}", ticket.name, err);
                let message = format!("Failed to load {}: {}", ticket.name, err);
                self.status = message.clone();
                self.load_state = LoadState::Failed {
                    name: ticket.name.clone(),
                    message: err.to_string(),
                };
                return LoadOutcome::Failed(message);
            }
        };

        if let Some(previous) = self.pivot.take() {
            previous.release();
        }

        let mut pivot = Pivot::wrap(model);
        let report = framing::frame(pivot.node_mut(), &self.config.framing);
        self.camera.apply_placement(&report.placement);
        self.pivot = Some(pivot);
        self.apply_material_state();

        self.debug_report = Some(DebugReport::new(&ticket.name, &report, self.camera.eye));
        self.download_link = Some(DownloadLink {
            href: ticket.url.clone(),
            file_name: ticket.name.clone(),
        });
        self.status.clear();
        self.load_state = LoadState::Loaded {
            name: ticket.name.clone(),
        };

        LoadOutcome::Installed(report)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Number of started loads that have not completed
    pub fn pending_loads(&self) -> usize {
        self.in_flight.len()
    }

    // Current model

    pub fn current_model(&self) -> Option<&Pivot> {
        self.pivot.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn debug_report(&self) -> Option<&DebugReport> {
        self.debug_report.as_ref()
    }

    pub fn download_link(&self) -> Option<&DownloadLink> {
        self.download_link.as_ref()
    }

    /// Move the current model's main mesh back to the origin
    pub fn center_model(&mut self) {
        if let Some(pivot) = &mut self.pivot {
            framing::recenter(pivot.node_mut(), false);
        }
    }

    /// Point the camera at the current model from the diagonal
    pub fn frame_model(&mut self) {
        let Some(pivot) = &mut self.pivot else {
            return;
        };
        let placement = framing::fit_camera(pivot.node_mut(), self.config.framing.fit_margin);
        self.camera.apply_placement(&placement);
    }

    /// Refit the camera to the current model, or restore the start-up view
    /// when there is none
    pub fn reset_camera(&mut self) {
        if self.pivot.is_some() {
            self.frame_model();
        } else {
            self.camera.reset_to_default();
        }
    }

    // Display toggles

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, enabled: bool) {
        self.wireframe = enabled;
        self.apply_material_state();
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    pub fn set_shading(&mut self, mode: ShadingMode) {
        self.shading = mode;
        self.apply_material_state();
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    pub fn orthographic(&self) -> bool {
        self.camera.projection == Projection::Orthographic
    }

    pub fn set_orthographic(&mut self, enabled: bool) {
        self.camera.set_projection(if enabled {
            Projection::Orthographic
        } else {
            Projection::Perspective
        });
    }

    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    pub fn set_light_intensity(&mut self, intensity: f32) {
        self.light_intensity = intensity.clamp(0.0, MAX_LIGHT_INTENSITY);
    }

    pub fn set_camera_preset(&mut self, preset: CameraPreset) {
        preset.apply(&mut self.camera);
    }

    /// Refresh per-frame camera data for the renderer
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    /// Release the current model and forget pending loads
    pub fn dispose(&mut self) {
        if let Some(pivot) = self.pivot.take() {
            pivot.release();
        }
        self.in_flight.clear();
        self.debug_report = None;
        self.download_link = None;
    }

    fn apply_material_state(&mut self) {
        let (wireframe, shading) = (self.wireframe, self.shading);
        if let Some(pivot) = &mut self.pivot {
            pivot.node_mut().traverse_meshes_mut(&mut |mesh| {
                mesh.set_shading(shading);
                mesh.set_wireframe(wireframe);
            });
        }
    }

    /// Bounds of the current model as displayed
    pub fn model_bounds(&mut self) -> Option<BoundingBox> {
        self.pivot
            .as_mut()
            .map(|pivot| framing::compute_hierarchy_bounding_box(pivot.node_mut()))
    }

    /// Diagonal placement for the current model as it is now
    pub fn suggested_placement(&mut self) -> Option<CameraPlacement> {
        let fit_margin = self.config.framing.fit_margin;
        self.model_bounds()
            .map(|bounds| placement_for_bounds(&bounds, fit_margin))
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> ModelEntry {
        ModelEntry {
            name: name.to_string(),
            url: format!("models/{}", name),
            size: String::new(),
        }
    }

    fn viewer_with(names: &[&str]) -> ViewerState {
        let mut viewer = ViewerState::default();
        viewer.set_manifest(Ok(ModelManifest {
            entries: names.iter().map(|n| entry(n)).collect(),
        }));
        viewer
    }

    #[test]
    fn test_missing_manifest_shows_hint() {
        let mut viewer = ViewerState::default();
        viewer.load_manifest("/definitely/not/here/models.json");

        assert!(viewer.manifest().is_empty());
        assert_eq!(viewer.empty_state_hint(), Some(EMPTY_MANIFEST_HINT));
        assert_eq!(viewer.status(), "No models available");
        assert!(viewer.next_model().is_none());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut viewer = viewer_with(&["a.obj", "b.obj", "c.obj"]);

        assert_eq!(viewer.previous_model().unwrap().name, "c.obj");
        assert_eq!(viewer.next_model().unwrap().name, "a.obj");
        assert_eq!(viewer.next_model().unwrap().name, "b.obj");
        assert_eq!(viewer.selected(), Some(1));
        assert!(viewer.select_model(7).is_none());
        assert_eq!(viewer.selected(), Some(1));
    }

    #[test]
    fn test_light_intensity_is_clamped() {
        let mut viewer = ViewerState::default();
        viewer.set_light_intensity(5.0);
        assert_eq!(viewer.light_intensity(), 2.0);
        viewer.set_light_intensity(-1.0);
        assert_eq!(viewer.light_intensity(), 0.0);
    }

    #[test]
    fn test_orthographic_toggle_and_perspective_preset() {
        let mut viewer = ViewerState::default();
        viewer.set_orthographic(true);
        assert!(viewer.orthographic());

        viewer.set_camera_preset(CameraPreset::Perspective);
        assert!(!viewer.orthographic());
    }

    #[test]
    fn test_reset_without_model_restores_default_view() {
        let mut viewer = ViewerState::default();
        let start = viewer.camera.eye;
        viewer.set_camera_preset(CameraPreset::Right);
        viewer.reset_camera();

        assert!((viewer.camera.eye - start).x.abs() < 1e-3);
        assert!((viewer.camera.eye - start).z.abs() < 1e-3);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut viewer = viewer_with(&["a.obj", "b.obj"]);
        let first = viewer.begin_load(&entry("a.obj"));
        let _second = viewer.begin_load(&entry("b.obj"));

        let outcome = viewer.install_model(&first, Ok(SceneNode::group("a.obj")));

        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(viewer.current_model().is_none());
        assert_eq!(viewer.status(), "Loading b.obj ...");
    }

    #[test]
    fn test_reset_matches_placement_after_load() {
        let mut viewer = viewer_with(&["tiny.obj"]);
        viewer.config.framing.target_unit_size = 0.5;
        let ticket = viewer.begin_load(&entry("tiny.obj"));
        let model = SceneNode::group("tiny.obj").with_child(SceneNode::mesh(
            "body",
            crate::gfx::scene::Mesh::new(
                crate::gfx::geometry::generate_cube(),
                crate::gfx::scene::Material::default(),
            ),
        ));
        viewer.install_model(&ticket, Ok(model));
        let after_load = viewer.camera.eye;

        viewer.reset_camera();

        assert!((viewer.camera.eye.x - after_load.x).abs() < 1e-4);
        assert!((viewer.camera.eye.y - after_load.y).abs() < 1e-4);
        assert!((viewer.camera.eye.x - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_failed_load_sets_status() {
        let mut viewer = viewer_with(&["broken.obj"]);
        let ticket = viewer.begin_load(&entry("broken.obj"));
        assert_eq!(viewer.status(), "Loading broken.obj ...");

        let outcome = viewer.install_model(
            &ticket,
            Err(LoadError::UnsupportedFormat("broken.obj".to_string())),
        );

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(viewer.status().starts_with("Failed to load broken.obj"));
        assert!(viewer.current_model().is_none());
    }
}
