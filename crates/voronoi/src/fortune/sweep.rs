//! Sweep driver: consumes site and circle events until both sources are exhausted.
//!
//! Purpose
//! - Run Fortune's sweep over a `SiteCatalog` and collect clipped segments.
//!
//! Why this design
//! - All mutable state lives in `Sweep`, which is built fresh for every call and
//!   dropped at the end. `Voronoi` only holds configuration, so one value can be
//!   shared and reused freely.
//! - Each step is chosen explicitly (`Step`), which keeps the site-vs-circle
//!   ordering rule in one place.
//!
//! Code cross-refs: `sites::SiteCatalog`, `queue::EventQueue`, `beach::BeachLine`,
//! `bisect::{Factory, intersect}`, `clip::Clipper`

use nalgebra::Vector2;
use tracing::debug;

use super::beach::{BeachLine, HalfEdgeId};
use super::bisect::{intersect, Factory};
use super::clip::Clipper;
use super::queue::EventQueue;
use super::sites::SiteCatalog;
use super::types::{EdgeId, Rect, Segment, Side, Site, VoronoiCfg, VoronoiError};

/// Voronoi diagram generator (configuration only; every call is independent).
#[derive(Clone, Copy, Debug, Default)]
pub struct Voronoi {
    cfg: VoronoiCfg,
}

/// Full result of one sweep.
#[derive(Clone, Debug)]
pub struct Diagram {
    /// Input sites in sweep order; `sites[i].index == i`.
    pub sites: Vec<Site>,
    /// `input_index[i]` is the caller's array position of `sites[i]`.
    pub input_index: Vec<usize>,
    /// Voronoi vertices in creation order; `vertices[i].index == i`.
    pub vertices: Vec<Site>,
    /// Number of bisector edges created during the sweep.
    pub edge_count: usize,
    /// Clipped edges in emission order.
    pub segments: Vec<Segment>,
}

impl Voronoi {
    pub fn new(cfg: VoronoiCfg) -> Self {
        Self { cfg }
    }

    /// Default tolerances with a custom minimum site separation.
    pub fn with_min_separation(min_separation: f64) -> Self {
        Self::new(VoronoiCfg {
            min_separation,
            ..VoronoiCfg::default()
        })
    }

    /// Clipped Voronoi edges of the sites `(xs[i], ys[i])`.
    ///
    /// Site indices in the result refer to the `(y, x)`-sorted order.
    pub fn generate(
        &self,
        xs: &[f64],
        ys: &[f64],
        rect: Rect,
    ) -> Result<Vec<Segment>, VoronoiError> {
        Ok(self.diagram(xs, ys, rect)?.segments)
    }

    /// Like `generate`, but also returns sorted sites, vertices and counts.
    pub fn diagram(&self, xs: &[f64], ys: &[f64], rect: Rect) -> Result<Diagram, VoronoiError> {
        let catalog = SiteCatalog::load(xs, ys)?;
        let count = catalog.len();
        let clipper = Clipper::new(rect, self.cfg.min_separation);
        let sweep = Sweep::new(catalog, clipper, self.cfg.eps_det)
            .ok_or(VoronoiError::TooFewSites { count })?;
        Ok(sweep.run())
    }
}

/// Next action of the sweep.
enum Step {
    Site(Site),
    Circle,
    Done,
}

/// Per-call sweep state.
struct Sweep {
    catalog: SiteCatalog,
    line: BeachLine,
    queue: EventQueue,
    factory: Factory,
    clipper: Clipper,
    eps_det: f64,
    next_site: Option<Site>,
    segments: Vec<Segment>,
}

impl Sweep {
    fn new(mut catalog: SiteCatalog, clipper: Clipper, eps_det: f64) -> Option<Self> {
        let bottom = catalog.next_site()?;
        let next_site = Some(catalog.next_site()?);
        let (min, delta, k) = (catalog.min(), catalog.delta(), catalog.hash_sqrt());
        Some(Self {
            line: BeachLine::new(2 * k, min.x, delta.x, bottom),
            queue: EventQueue::new(4 * k, min.y, delta.y),
            catalog,
            factory: Factory::default(),
            clipper,
            eps_det,
            next_site,
            segments: Vec::new(),
        })
    }

    fn next_step(&mut self) -> Step {
        match (self.next_site, self.queue.peek_min()) {
            (Some(site), None) => Step::Site(site),
            (Some(site), Some(p)) if site.precedes(p) => Step::Site(site),
            (_, Some(_)) => Step::Circle,
            (None, None) => Step::Done,
        }
    }

    fn run(mut self) -> Diagram {
        loop {
            match self.next_step() {
                Step::Site(site) => {
                    self.site_event(site);
                    self.next_site = self.catalog.next_site();
                }
                Step::Circle => self.circle_event(),
                Step::Done => break,
            }
        }
        // Edges still on the beach line are open on at least one side.
        let open: Vec<EdgeId> = self
            .line
            .iter()
            .filter_map(|he| self.line.node(he).edge)
            .collect();
        for e in open {
            self.emit(e);
        }

        debug!(
            sites = self.catalog.len(),
            vertices = self.factory.vertices().len(),
            edges = self.factory.edges().len(),
            segments = self.segments.len(),
            "sweep done"
        );
        let edge_count = self.factory.edges().len();
        let (sites, input_index) = self.catalog.into_parts();
        Diagram {
            sites,
            input_index,
            vertices: self.factory.into_vertices(),
            edge_count,
            segments: self.segments,
        }
    }

    fn intersect(&self, he1: HalfEdgeId, he2: HalfEdgeId) -> Option<Vector2<f64>> {
        intersect(&self.line, self.factory.edges(), he1, he2, self.eps_det)
    }

    /// (Re)schedule the circle event of `he` at `p`, fired by `site`.
    fn schedule(&mut self, he: HalfEdgeId, p: Vector2<f64>, site: &Site) {
        self.queue.remove(&mut self.line, he);
        self.queue.insert(&mut self.line, he, p, (p - site.pos).norm());
    }

    fn site_event(&mut self, site: Site) {
        let lbnd = self.line.find_left_boundary(site.pos, self.factory.edges());
        let rbnd = self.line.right(lbnd);
        let bottom = self.line.region_right(lbnd, self.factory.edges());
        let e = self.factory.bisect(bottom, site);

        let left = self.line.create(e, Side::Left);
        self.line.insert_after(lbnd, left);
        if let Some(p) = self.intersect(lbnd, left) {
            self.schedule(lbnd, p, &site);
        }

        let right = self.line.create(e, Side::Right);
        self.line.insert_after(left, right);
        if let Some(p) = self.intersect(right, rbnd) {
            self.schedule(right, p, &site);
        }
    }

    fn circle_event(&mut self) {
        let Some((lbnd, pos)) = self.queue.pop_min(&mut self.line) else {
            return;
        };
        let llbnd = self.line.left(lbnd);
        let rbnd = self.line.right(lbnd);
        let rrbnd = self.line.right(rbnd);
        let mut bottom = self.line.region_left(lbnd, self.factory.edges());
        let mut top = self.line.region_right(rbnd, self.factory.edges());

        let v = self.factory.new_vertex(pos);
        for he in [lbnd, rbnd] {
            let (edge, side) = (self.line.node(he).edge, self.line.node(he).side);
            if let Some(e) = edge {
                self.set_endpoint(e, side, v);
            }
        }
        self.line.remove(lbnd);
        self.queue.remove(&mut self.line, rbnd);
        self.line.remove(rbnd);

        let mut side = Side::Left;
        if bottom.y() > top.y() {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }
        let e = self.factory.bisect(bottom, top);
        let bisector = self.line.create(e, side);
        self.line.insert_after(llbnd, bisector);
        self.set_endpoint(e, side.opposite(), v);

        if let Some(p) = self.intersect(llbnd, bisector) {
            self.schedule(llbnd, p, &bottom);
        }
        if let Some(p) = self.intersect(bisector, rrbnd) {
            self.schedule(bisector, p, &bottom);
        }
    }

    fn set_endpoint(&mut self, e: EdgeId, side: Side, v: Site) {
        if self.factory.set_endpoint(e, side, v) {
            self.emit(e);
        }
    }

    /// Clip `e` once and record the segment, if any.
    fn emit(&mut self, e: EdgeId) {
        let edge = self.factory.edge_mut(e);
        if edge.clipped {
            return;
        }
        edge.clipped = true;
        if let Some(seg) = self.clipper.clip(edge) {
            self.segments.push(seg);
        }
    }
}
