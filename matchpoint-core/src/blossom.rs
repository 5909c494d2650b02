/// Maximum-weight matching on general graphs.
///
/// Primal-dual blossom-shrinking method (Galil, "Efficient algorithms for
/// finding maximum matching in graphs", 1986), following the classic
/// array-based reference formulation of the algorithm. O(V^3), which is
/// comfortable at tournament sizes.
///
/// With `max_cardinality` set, the matching is the maximum-weight one
/// among matchings of maximum cardinality; this is the mode the pairing
/// engine uses, since a round must cover every player.
///
/// Vertices are `0..num_vertices`; edges are `(v, w, weight)` with
/// arbitrary `f64` weights (negative is fine). The result maps each
/// vertex to its partner, `None` for unmatched.

/// Sentinel for "no vertex / no endpoint / no edge".
const NONE: usize = usize::MAX;

pub fn maximum_weight_matching(
    num_vertices: usize,
    edges: &[(usize, usize, f64)],
    max_cardinality: bool,
) -> Vec<Option<usize>> {
    for &(i, j, _) in edges {
        assert!(i != j, "self-loop edge at vertex {}", i);
        assert!(
            i < num_vertices && j < num_vertices,
            "edge ({}, {}) out of range for {} vertices",
            i,
            j,
            num_vertices
        );
    }
    if num_vertices == 0 || edges.is_empty() {
        return vec![None; num_vertices];
    }
    let mut matcher = Matcher::new(num_vertices, edges, max_cardinality);
    matcher.run();
    matcher.into_matching()
}

/// Working state for one matching computation.
///
/// Slots `0..nvertex` describe single vertices, slots `nvertex..2*nvertex`
/// describe (possibly unused) blossoms. An edge k has endpoints `2k` and
/// `2k+1`; `endpoint[p]` is the vertex an endpoint attaches to, and `p ^ 1`
/// is the opposite endpoint of the same edge.
struct Matcher<'a> {
    edges: &'a [(usize, usize, f64)],
    max_cardinality: bool,
    nvertex: usize,
    endpoint: Vec<usize>,
    neighbend: Vec<Vec<usize>>,
    /// mate[v] is an endpoint index (partner = endpoint[mate[v]]).
    mate: Vec<usize>,
    /// 0 free, 1 = S (even tree level), 2 = T (odd), bit 4 = breadcrumb.
    label: Vec<u8>,
    /// Endpoint through which a labeled vertex/blossom got its label.
    labelend: Vec<usize>,
    /// Top-level blossom containing each vertex.
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    /// blossomendps[b][i] connects blossomchilds[b][i] to its successor
    /// around the cycle.
    blossomendps: Vec<Vec<usize>>,
    /// Least-slack edge to a different S-blossom, per vertex/blossom.
    bestedge: Vec<usize>,
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<f64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

/// Python-style wrapping index into a blossom child/endpoint cycle.
fn wr(j: isize, len: isize) -> usize {
    j.rem_euclid(len) as usize
}

impl<'a> Matcher<'a> {
    fn new(num_vertices: usize, edges: &'a [(usize, usize, f64)], max_cardinality: bool) -> Self {
        let nvertex = num_vertices;
        let nedge = edges.len();
        let maxweight = edges.iter().map(|e| e.2).fold(0.0_f64, f64::max);

        let mut endpoint = Vec::with_capacity(2 * nedge);
        for &(i, j, _) in edges {
            endpoint.push(i);
            endpoint.push(j);
        }
        let mut neighbend: Vec<Vec<usize>> = vec![Vec::new(); nvertex];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }

        let mut dualvar = vec![maxweight; nvertex];
        dualvar.extend(std::iter::repeat(0.0).take(nvertex));

        Matcher {
            edges,
            max_cardinality,
            nvertex,
            endpoint,
            neighbend,
            mate: vec![NONE; nvertex],
            label: vec![0; 2 * nvertex],
            labelend: vec![NONE; 2 * nvertex],
            inblossom: (0..nvertex).collect(),
            blossomparent: vec![NONE; 2 * nvertex],
            blossomchilds: vec![Vec::new(); 2 * nvertex],
            blossombase: (0..nvertex).chain(std::iter::repeat(NONE).take(nvertex)).collect(),
            blossomendps: vec![Vec::new(); 2 * nvertex],
            bestedge: vec![NONE; 2 * nvertex],
            blossombestedges: vec![None; 2 * nvertex],
            unusedblossoms: (nvertex..2 * nvertex).collect(),
            dualvar,
            allowedge: vec![false; nedge],
            queue: Vec::new(),
        }
    }

    /// Slack of edge k under the current duals. Tight (zero slack) edges
    /// may enter the matching.
    fn slack(&self, k: usize) -> f64 {
        let (i, j, wt) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2.0 * wt
    }

    /// All single vertices inside blossom b (b itself if it is a vertex).
    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.nvertex {
                leaves.push(t);
            } else {
                stack.extend(self.blossomchilds[t].iter().copied());
            }
        }
        leaves
    }

    /// Label vertex w (and its top blossom) as S (t=1) or T (t=2), having
    /// been reached through endpoint p. An S label immediately relabels
    /// the base's mate as T would, i.e. T labels pull their mate into the
    /// tree as S.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        debug_assert!(self.label[w] == 0 && self.label[b] == 0);
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == 1 {
            let leaves = self.blossom_leaves(b);
            self.queue.extend(leaves);
        } else if t == 2 {
            let base = self.blossombase[b];
            debug_assert!(self.mate[base] != NONE);
            let mp = self.mate[base];
            self.assign_label(self.endpoint[mp], 1, mp ^ 1);
        }
    }

    /// Trace back from both ends of edge (v, w) toward the tree roots,
    /// dropping breadcrumbs, to find the lowest common ancestor blossom.
    /// Returns its base vertex, or NONE when the paths reach two distinct
    /// roots (which means the edge closes an augmenting path).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let mut v = v;
        let mut w = w;
        let mut path = Vec::new();
        let mut base = NONE;
        loop {
            if v == NONE && w == NONE {
                break;
            }
            debug_assert!(v != NONE);
            let b = self.inblossom[v];
            if self.label[b] & 4 != 0 {
                base = self.blossombase[b];
                break;
            }
            debug_assert!(self.label[b] == 1);
            path.push(b);
            self.label[b] = 5;
            debug_assert!(self.labelend[b] == self.mate[self.blossombase[b]]);
            if self.labelend[b] == NONE {
                // Reached a tree root.
                v = NONE;
            } else {
                v = self.endpoint[self.labelend[b]];
                let b = self.inblossom[v];
                debug_assert!(self.label[b] == 2);
                debug_assert!(self.labelend[b] != NONE);
                v = self.endpoint[self.labelend[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = 1;
        }
        base
    }

    /// Shrink the cycle closed by edge k through the common ancestor with
    /// base vertex `base` into a new S-blossom.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];
        let b = self.unusedblossoms.pop().expect("free blossom slot");
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;

        // Collect the cycle: base child first, then around through edge k.
        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            debug_assert!(self.labelend[bv] != NONE);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            debug_assert!(self.labelend[bw] != NONE);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }
        debug_assert!(self.label[bb] == 1);
        self.label[b] = 1;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0.0;
        self.blossomchilds[b] = path;
        self.blossomendps[b] = endps;

        for leaf in self.blossom_leaves(b) {
            if self.label[self.inblossom[leaf]] == 2 {
                // Former T-vertices become S with the blossom; scan them.
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        // Merge least-slack edge bookkeeping from the sub-blossoms.
        let mut bestedgeto = vec![NONE; 2 * self.nvertex];
        for bv in self.blossomchilds[b].clone() {
            let nblists: Vec<Vec<usize>> = match &self.blossombestedges[bv] {
                None => self
                    .blossom_leaves(bv)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
                Some(list) => vec![list.clone()],
            };
            for nblist in nblists {
                for ek in nblist {
                    let (i0, j0, _) = self.edges[ek];
                    let j = if self.inblossom[j0] == b { i0 } else { j0 };
                    let bj = self.inblossom[j];
                    if bj != b
                        && self.label[bj] == 1
                        && (bestedgeto[bj] == NONE || self.slack(ek) < self.slack(bestedgeto[bj]))
                    {
                        bestedgeto[bj] = ek;
                    }
                }
            }
            self.blossombestedges[bv] = None;
            self.bestedge[bv] = NONE;
        }
        let best: Vec<usize> = bestedgeto.into_iter().filter(|&e| e != NONE).collect();
        self.bestedge[b] = NONE;
        for &ek in &best {
            if self.bestedge[b] == NONE || self.slack(ek) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = ek;
            }
        }
        self.blossombestedges[b] = Some(best);
    }

    /// Undo blossom b. During a stage (endstage false) this happens when
    /// the blossom's dual hits zero while labeled T: the path through it
    /// must be relabeled edge by edge. At the end of a stage the contents
    /// are simply released.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let childs = self.blossomchilds[b].clone();
        for &s in &childs {
            self.blossomparent[s] = NONE;
            if s < self.nvertex {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0.0 {
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }
        if !endstage && self.label[b] == 2 {
            // Walk the even-length side of the cycle from the entry child
            // to the base, alternating T and S labels.
            debug_assert!(self.labelend[b] != NONE);
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let endps = self.blossomendps[b].clone();
            let len = childs.len() as isize;
            let i = childs
                .iter()
                .position(|&c| c == entrychild)
                .expect("entry child in cycle");
            let mut j = i as isize;
            let (jstep, endptrick): (isize, usize) = if i & 1 != 0 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };
            let mut p = self.labelend[b];
            while j != 0 {
                self.label[self.endpoint[p ^ 1]] = 0;
                let q = endps[wr(j - endptrick as isize, len)] ^ endptrick ^ 1;
                self.label[self.endpoint[q]] = 0;
                let t_vertex = self.endpoint[p ^ 1];
                self.assign_label(t_vertex, 2, p);
                self.allowedge[endps[wr(j - endptrick as isize, len)] / 2] = true;
                j += jstep;
                p = endps[wr(j - endptrick as isize, len)] ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }
            // The base child keeps label T without stepping to its mate.
            let bv = childs[wr(j, len)];
            let entry_vertex = self.endpoint[p ^ 1];
            self.label[entry_vertex] = 2;
            self.label[bv] = 2;
            self.labelend[entry_vertex] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NONE;
            // The remaining children leave the tree unless some vertex of
            // theirs was reached independently from outside.
            j += jstep;
            while childs[wr(j, len)] != entrychild {
                let sub = childs[wr(j, len)];
                if self.label[sub] == 1 {
                    j += jstep;
                    continue;
                }
                let reached = self
                    .blossom_leaves(sub)
                    .into_iter()
                    .find(|&leaf| self.label[leaf] != 0);
                if let Some(v) = reached {
                    debug_assert!(self.label[v] == 2);
                    debug_assert!(self.inblossom[v] == sub);
                    self.label[v] = 0;
                    self.label[self.endpoint[self.mate[self.blossombase[sub]]]] = 0;
                    let le = self.labelend[v];
                    self.assign_label(v, 2, le);
                }
                j += jstep;
            }
        }
        self.label[b] = 0;
        self.labelend[b] = NONE;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    /// Swap matched and unmatched edges around blossom b so that vertex v
    /// becomes the new base (v is about to be matched externally).
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.nvertex {
            self.augment_blossom(t, v);
        }
        let childs = self.blossomchilds[b].clone();
        let endps = self.blossomendps[b].clone();
        let len = childs.len() as isize;
        let i = childs.iter().position(|&c| c == t).expect("child in cycle");
        let mut j = i as isize;
        let (jstep, endptrick): (isize, usize) = if i & 1 != 0 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        while j != 0 {
            j += jstep;
            let t1 = childs[wr(j, len)];
            let p = endps[wr(j - endptrick as isize, len)] ^ endptrick;
            if t1 >= self.nvertex {
                self.augment_blossom(t1, self.endpoint[p]);
            }
            j += jstep;
            let t2 = childs[wr(j, len)];
            if t2 >= self.nvertex {
                self.augment_blossom(t2, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }
        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert!(self.blossombase[b] == v);
    }

    /// Augment the matching along the path closed by tight edge k,
    /// rotating every blossom the path passes through.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (start, start_p) in [(v, 2 * k + 1), (w, 2 * k)] {
            let mut s = start;
            let mut p = start_p;
            loop {
                let bs = self.inblossom[s];
                debug_assert!(self.label[bs] == 1);
                debug_assert!(self.labelend[bs] == self.mate[self.blossombase[bs]]);
                if bs >= self.nvertex {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    // Tree root: augmenting path ends here.
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                debug_assert!(self.label[bt] == 2);
                debug_assert!(self.labelend[bt] != NONE);
                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                debug_assert!(self.blossombase[bt] == t);
                if bt >= self.nvertex {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
            }
        }
    }

    fn run(&mut self) {
        let nvertex = self.nvertex;
        for _ in 0..nvertex {
            // Fresh stage: forget labels, allowed edges and best-edge
            // caches; keep the matching, blossoms and duals.
            self.label = vec![0; 2 * nvertex];
            self.bestedge = vec![NONE; 2 * nvertex];
            self.blossombestedges = vec![None; 2 * nvertex];
            self.allowedge = vec![false; self.edges.len()];
            self.queue.clear();

            for v in 0..nvertex {
                if self.mate[v] == NONE && self.label[self.inblossom[v]] == 0 {
                    self.assign_label(v, 1, NONE);
                }
            }

            let mut augmented = false;
            loop {
                'scan: while let Some(v) = self.queue.pop() {
                    debug_assert!(self.label[self.inblossom[v]] == 1);
                    for nb in 0..self.neighbend[v].len() {
                        let p = self.neighbend[v][nb];
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            continue;
                        }
                        let mut kslack = 0.0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0.0 {
                                self.allowedge[k] = true;
                            }
                        }
                        if self.allowedge[k] {
                            if self.label[self.inblossom[w]] == 0 {
                                self.assign_label(w, 2, p ^ 1);
                            } else if self.label[self.inblossom[w]] == 1 {
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break 'scan;
                                }
                            } else if self.label[w] == 0 {
                                debug_assert!(self.label[self.inblossom[w]] == 2);
                                self.label[w] = 2;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == 1 {
                            let b = self.inblossom[v];
                            if self.bestedge[b] == NONE || kslack < self.slack(self.bestedge[b]) {
                                self.bestedge[b] = k;
                            }
                        } else if self.label[w] == 0
                            && (self.bestedge[w] == NONE || kslack < self.slack(self.bestedge[w]))
                        {
                            self.bestedge[w] = k;
                        }
                    }
                }
                if augmented {
                    break;
                }

                // No augmenting path under the current duals; compute the
                // largest safe dual change.
                let mut deltatype = -1i32;
                let mut delta = 0.0_f64;
                let mut deltaedge = NONE;
                let mut deltablossom = NONE;

                if !self.max_cardinality {
                    deltatype = 1;
                    delta = self.dualvar[..nvertex]
                        .iter()
                        .fold(f64::INFINITY, |a, &d| a.min(d))
                        .max(0.0);
                }
                for v in 0..nvertex {
                    if self.label[self.inblossom[v]] == 0 && self.bestedge[v] != NONE {
                        let d = self.slack(self.bestedge[v]);
                        if deltatype == -1 || d < delta {
                            delta = d;
                            deltatype = 2;
                            deltaedge = self.bestedge[v];
                        }
                    }
                }
                for b in 0..2 * nvertex {
                    if self.blossomparent[b] == NONE
                        && self.label[b] == 1
                        && self.bestedge[b] != NONE
                    {
                        let d = self.slack(self.bestedge[b]) / 2.0;
                        if deltatype == -1 || d < delta {
                            delta = d;
                            deltatype = 3;
                            deltaedge = self.bestedge[b];
                        }
                    }
                }
                for b in nvertex..2 * nvertex {
                    if self.blossombase[b] != NONE
                        && self.blossomparent[b] == NONE
                        && self.label[b] == 2
                        && (deltatype == -1 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        deltatype = 4;
                        deltablossom = b;
                    }
                }
                if deltatype == -1 {
                    // No improvement possible: optimum at this cardinality.
                    deltatype = 1;
                    delta = self.dualvar[..nvertex]
                        .iter()
                        .fold(f64::INFINITY, |a, &d| a.min(d))
                        .max(0.0);
                }

                for v in 0..nvertex {
                    match self.label[self.inblossom[v]] {
                        1 => self.dualvar[v] -= delta,
                        2 => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in nvertex..2 * nvertex {
                    if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                        match self.label[b] {
                            1 => self.dualvar[b] += delta,
                            2 => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match deltatype {
                    1 => break,
                    2 => {
                        self.allowedge[deltaedge] = true;
                        let (i0, j0, _) = self.edges[deltaedge];
                        let i = if self.label[self.inblossom[i0]] == 0 { j0 } else { i0 };
                        debug_assert!(self.label[self.inblossom[i]] == 1);
                        self.queue.push(i);
                    }
                    3 => {
                        self.allowedge[deltaedge] = true;
                        let (i0, _, _) = self.edges[deltaedge];
                        debug_assert!(self.label[self.inblossom[i0]] == 1);
                        self.queue.push(i0);
                    }
                    _ => {
                        self.expand_blossom(deltablossom, false);
                    }
                }
            }

            if !augmented {
                break;
            }

            // Release S-blossoms whose dual dropped to zero.
            for b in nvertex..2 * nvertex {
                if self.blossomparent[b] == NONE
                    && self.blossombase[b] != NONE
                    && self.label[b] == 1
                    && self.dualvar[b] == 0.0
                {
                    self.expand_blossom(b, true);
                }
            }
        }
    }

    fn into_matching(self) -> Vec<Option<usize>> {
        let mut matching = vec![None; self.nvertex];
        for v in 0..self.nvertex {
            if self.mate[v] != NONE {
                matching[v] = Some(self.endpoint[self.mate[v]]);
            }
        }
        // Partners must agree in both directions.
        for v in 0..self.nvertex {
            if let Some(w) = matching[v] {
                debug_assert!(matching[w] == Some(v));
            }
        }
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mates(expected: &[i64]) -> Vec<Option<usize>> {
        expected
            .iter()
            .map(|&m| if m < 0 { None } else { Some(m as usize) })
            .collect()
    }

    fn solve(n: usize, edges: &[(usize, usize, f64)]) -> Vec<Option<usize>> {
        maximum_weight_matching(n, edges, false)
    }

    fn solve_perfect(n: usize, edges: &[(usize, usize, f64)]) -> Vec<Option<usize>> {
        maximum_weight_matching(n, edges, true)
    }

    #[test]
    fn test_no_edges() {
        assert_eq!(solve(0, &[]), mates(&[]));
        assert_eq!(solve(3, &[]), mates(&[-1, -1, -1]));
    }

    #[test]
    fn test_single_edge() {
        assert_eq!(solve(2, &[(0, 1, 1.0)]), mates(&[1, 0]));
    }

    #[test]
    fn test_heavier_edge_wins() {
        let edges = [(1, 2, 10.0), (2, 3, 11.0)];
        assert_eq!(solve(4, &edges), mates(&[-1, -1, 3, 2]));
    }

    #[test]
    fn test_cardinality_overrides_weight() {
        let edges = [(1, 2, 5.0), (2, 3, 11.0), (3, 4, 5.0)];
        assert_eq!(solve(5, &edges), mates(&[-1, -1, 3, 2, -1]));
        assert_eq!(solve_perfect(5, &edges), mates(&[-1, 2, 1, 4, 3]));
    }

    #[test]
    fn test_float_weights() {
        let edges = [
            (1, 2, std::f64::consts::PI),
            (2, 3, std::f64::consts::E),
            (1, 3, 3.0),
            (1, 4, std::f64::consts::SQRT_2),
        ];
        assert_eq!(solve(5, &edges), mates(&[-1, 4, 3, 2, 1]));
    }

    #[test]
    fn test_negative_weights() {
        let edges = [
            (1, 2, 2.0),
            (1, 3, -2.0),
            (2, 3, 1.0),
            (2, 4, -1.0),
            (3, 4, -6.0),
        ];
        assert_eq!(solve(5, &edges), mates(&[-1, 2, 1, -1, -1]));
        assert_eq!(solve_perfect(5, &edges), mates(&[-1, 3, 4, 1, 2]));
    }

    #[test]
    fn test_s_blossom_augmentation() {
        let edges = [(1, 2, 8.0), (1, 3, 9.0), (2, 3, 10.0), (3, 4, 7.0)];
        assert_eq!(solve(5, &edges), mates(&[-1, 2, 1, 4, 3]));

        let edges = [
            (1, 2, 8.0),
            (1, 3, 9.0),
            (2, 3, 10.0),
            (3, 4, 7.0),
            (1, 6, 5.0),
            (4, 5, 6.0),
        ];
        assert_eq!(solve(7, &edges), mates(&[-1, 6, 3, 2, 5, 4, 1]));
    }

    #[test]
    fn test_s_blossom_relabeled_as_t() {
        let edges = [
            (1, 2, 9.0),
            (1, 3, 8.0),
            (2, 3, 10.0),
            (1, 4, 5.0),
            (4, 5, 4.0),
            (1, 6, 3.0),
        ];
        assert_eq!(solve(7, &edges), mates(&[-1, 6, 3, 2, 5, 4, 1]));

        let edges = [
            (1, 2, 9.0),
            (1, 3, 8.0),
            (2, 3, 10.0),
            (1, 4, 5.0),
            (4, 5, 3.0),
            (1, 6, 4.0),
        ];
        assert_eq!(solve(7, &edges), mates(&[-1, 6, 3, 2, 5, 4, 1]));

        let edges = [
            (1, 2, 9.0),
            (1, 3, 8.0),
            (2, 3, 10.0),
            (1, 4, 5.0),
            (4, 5, 3.0),
            (3, 6, 4.0),
        ];
        assert_eq!(solve(7, &edges), mates(&[-1, 2, 1, 6, 5, 4, 3]));
    }

    #[test]
    fn test_nested_s_blossom() {
        let edges = [
            (1, 2, 9.0),
            (1, 3, 9.0),
            (2, 3, 10.0),
            (2, 4, 8.0),
            (3, 5, 8.0),
            (4, 5, 10.0),
            (5, 6, 6.0),
        ];
        assert_eq!(solve(7, &edges), mates(&[-1, 3, 4, 1, 2, 6, 5]));
    }

    #[test]
    fn test_s_blossom_relabeled_inside_bigger_blossom() {
        let edges = [
            (1, 2, 10.0),
            (1, 7, 10.0),
            (2, 3, 12.0),
            (3, 4, 20.0),
            (3, 5, 20.0),
            (4, 5, 25.0),
            (5, 6, 10.0),
            (6, 7, 10.0),
            (7, 8, 8.0),
        ];
        assert_eq!(solve(9, &edges), mates(&[-1, 2, 1, 4, 3, 6, 5, 8, 7]));
    }

    #[test]
    fn test_nested_blossom_expands_recursively() {
        let edges = [
            (1, 2, 8.0),
            (1, 3, 8.0),
            (2, 3, 10.0),
            (2, 4, 12.0),
            (3, 5, 12.0),
            (4, 5, 14.0),
            (4, 6, 12.0),
            (5, 7, 12.0),
            (6, 7, 14.0),
            (7, 8, 12.0),
        ];
        assert_eq!(solve(9, &edges), mates(&[-1, 2, 1, 5, 6, 3, 4, 8, 7]));
    }

    #[test]
    fn test_s_blossom_relabeled_t_then_expanded() {
        let edges = [
            (1, 2, 23.0),
            (1, 5, 22.0),
            (1, 6, 15.0),
            (2, 3, 25.0),
            (3, 4, 22.0),
            (4, 5, 25.0),
            (4, 8, 14.0),
            (5, 7, 13.0),
        ];
        assert_eq!(solve(9, &edges), mates(&[-1, 6, 3, 2, 8, 7, 1, 5, 4]));
    }

    #[test]
    fn test_nested_s_blossom_relabeled_t_then_expanded() {
        let edges = [
            (1, 2, 19.0),
            (1, 3, 20.0),
            (1, 8, 8.0),
            (2, 3, 25.0),
            (2, 4, 18.0),
            (3, 5, 18.0),
            (4, 5, 13.0),
            (4, 7, 7.0),
            (5, 6, 7.0),
        ];
        assert_eq!(solve(9, &edges), mates(&[-1, 8, 3, 2, 7, 6, 5, 4, 1]));
    }

    #[test]
    fn test_blossom_relabeled_along_multiple_paths() {
        let edges = [
            (1, 2, 45.0),
            (1, 5, 45.0),
            (2, 3, 50.0),
            (3, 4, 45.0),
            (4, 5, 50.0),
            (1, 6, 30.0),
            (3, 9, 35.0),
            (4, 8, 35.0),
            (5, 7, 26.0),
            (9, 10, 5.0),
        ];
        assert_eq!(
            solve(11, &edges),
            mates(&[-1, 6, 3, 2, 8, 7, 1, 5, 4, 10, 9])
        );
    }

    #[test]
    fn test_perfect_matching_on_penalty_weights() {
        // Complete K4 with zero-or-negative weights, the shape the pairing
        // engine feeds in: the least-bad perfect matching must win.
        let edges = [
            (0, 1, 0.0),
            (2, 3, 0.0),
            (0, 2, -1.0),
            (1, 3, -1.0),
            (0, 3, -2.0),
            (1, 2, -2.0),
        ];
        assert_eq!(solve_perfect(4, &edges), mates(&[1, 0, 3, 2]));
    }

    #[test]
    fn test_partner_links_are_symmetric() {
        let edges = [
            (0, 1, 6.0),
            (0, 2, 10.0),
            (1, 2, 5.0),
            (1, 3, 4.0),
            (2, 4, 3.0),
            (3, 4, 7.0),
            (3, 5, 5.0),
            (4, 5, 8.0),
        ];
        let matching = solve_perfect(6, &edges);
        for v in 0..6 {
            let w = matching[v].expect("perfect matching");
            assert_eq!(matching[w], Some(v));
            assert_ne!(w, v);
        }
    }
}
