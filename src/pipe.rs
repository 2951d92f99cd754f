//! Lazy pipeline wrapper used to express multi-stage record extraction as a
//! left-to-right chain. Nothing is evaluated until `materialize` or
//! `try_materialize` drives the underlying iterator.

/// Wrapper around a lazy sequence (or, via [`Pipe::through`], any
/// intermediate value a collaborator hands back).
pub struct Pipe<T> {
    inner: T,
}

impl<T> Pipe<T> {
    pub fn new(inner: T) -> Self {
        Pipe { inner }
    }

    /// Hand the entire inner value to an arbitrary function and wrap its
    /// result. Escape hatch for delegating to external collaborators.
    #[allow(dead_code)]
    pub fn through<R, F>(self, f: F) -> Pipe<R>
    where
        F: FnOnce(T) -> R,
    {
        Pipe::new(f(self.inner))
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<I: Iterator> Pipe<I> {
    /// Element-wise transform. Order and cardinality preserved.
    pub fn map<B, F>(self, f: F) -> Pipe<impl Iterator<Item = B>>
    where
        F: FnMut(I::Item) -> B,
    {
        Pipe::new(self.inner.map(f))
    }

    /// Keep elements satisfying `pred`, preserving relative order.
    #[allow(dead_code)]
    pub fn filter<P>(self, pred: P) -> Pipe<impl Iterator<Item = I::Item>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Pipe::new(self.inner.filter(pred))
    }

    /// Transform the first component of pair elements, leaving the second
    /// untouched.
    #[allow(dead_code)]
    pub fn map_fst<A, B, A2, F>(self, mut f: F) -> Pipe<impl Iterator<Item = (A2, B)>>
    where
        I: Iterator<Item = (A, B)>,
        F: FnMut(A) -> A2,
    {
        Pipe::new(self.inner.map(move |(a, b)| (f(a), b)))
    }

    /// Transform the second component of pair elements, leaving the first
    /// untouched.
    #[allow(dead_code)]
    pub fn map_snd<A, B, B2, G>(self, mut g: G) -> Pipe<impl Iterator<Item = (A, B2)>>
    where
        I: Iterator<Item = (A, B)>,
        G: FnMut(B) -> B2,
    {
        Pipe::new(self.inner.map(move |(a, b)| (a, g(b))))
    }

    /// Apply `f` to the first and `g` to the second component of each pair,
    /// pairwise. Component count and function count are tied by the
    /// signature.
    pub fn map_both<A, B, A2, B2, F, G>(
        self,
        mut f: F,
        mut g: G,
    ) -> Pipe<impl Iterator<Item = (A2, B2)>>
    where
        I: Iterator<Item = (A, B)>,
        F: FnMut(A) -> A2,
        G: FnMut(B) -> B2,
    {
        Pipe::new(self.inner.map(move |(a, b)| (f(a), g(b))))
    }

    /// Call `f` with the components of each pair as separate arguments.
    pub fn map_pair<A, B, C, F>(self, mut f: F) -> Pipe<impl Iterator<Item = C>>
    where
        I: Iterator<Item = (A, B)>,
        F: FnMut(A, B) -> C,
    {
        Pipe::new(self.inner.map(move |(a, b)| f(a, b)))
    }

    /// Like [`Pipe::filter`], but the predicate receives the pair's
    /// components as separate borrows.
    pub fn filter_pair<A, B, P>(self, mut pred: P) -> Pipe<impl Iterator<Item = (A, B)>>
    where
        I: Iterator<Item = (A, B)>,
        P: FnMut(&A, &B) -> bool,
    {
        Pipe::new(self.inner.filter(move |(a, b)| pred(a, b)))
    }

    /// Run two transformations over the same element and collect the
    /// results positionally.
    #[allow(dead_code)]
    pub fn fan2<A, B, F, G>(self, mut f: F, mut g: G) -> Pipe<impl Iterator<Item = (A, B)>>
    where
        F: FnMut(&I::Item) -> A,
        G: FnMut(&I::Item) -> B,
    {
        Pipe::new(self.inner.map(move |x| (f(&x), g(&x))))
    }

    /// Concatenate a sequence of sequences, preserving order across and
    /// within sub-sequences.
    #[allow(dead_code)]
    pub fn flatten(self) -> Pipe<impl Iterator<Item = <I::Item as IntoIterator>::Item>>
    where
        I::Item: IntoIterator,
    {
        Pipe::new(self.inner.flatten())
    }

    /// Eager terminal: force full evaluation into an ordered `Vec`.
    #[allow(dead_code)]
    pub fn materialize(self) -> Vec<I::Item> {
        self.inner.collect()
    }

    /// Eager terminal for `Result` elements: collect into `Ok(Vec<_>)` or
    /// stop at the first `Err`, leaving the rest of the sequence
    /// unevaluated.
    pub fn try_materialize<T, E>(self) -> Result<Vec<T>, E>
    where
        I: Iterator<Item = Result<T, E>>,
    {
        self.inner.collect()
    }
}

// ── Tests ──
