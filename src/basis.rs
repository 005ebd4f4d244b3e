//! Cubic Hermite basis functions
//!
//! The 1-D cubic Hermite functions on `[0,1]` are
//! $$\psi^0_1(x) = 1-3x^2+2x^3,\quad \psi^1_1(x) = x(x-1)^2,$$
//! $$\psi^0_2(x) = x^2(3-2x),\quad \psi^1_2(x) = x^2(x-1),$$
//! where the subscript is the node (1 at $`x=0`$, 2 at $`x=1`$) and the superscript
//! selects the value (0) or the derivative (1) interpolated at that node.
//!
//! The tricubic Hermite basis is the tensor product of three of these.
//! Its 64 functions are numbered `n*8 + k` where `n` is the local node (xi1 varying fastest)
//! and `k` the derivative slot (see [`ValueLabel`](crate::ValueLabel)):
//! bit 0, 1 and 2 of `k` select a derivative along xi1, xi2 and xi3 respectively.

use nalgebra::{Point3, Vector3};

/// Number of local nodes of a hexahedron
pub const NODES_COUNT: usize = 8;
/// Number of basis functions per local node
pub const SLOTS_COUNT: usize = 8;
/// Total number of tricubic Hermite basis functions
pub const FUNCTIONS_COUNT: usize = NODES_COUNT * SLOTS_COUNT;

/// 1-D cubic Hermite function
///
/// `node` is 0 or 1 for the node at `x=0` or `x=1`, `derivative` is 0 for the value function
/// and 1 for the derivative function
pub fn psi(node: usize, derivative: usize, x: f64) -> f64 {
    match (node, derivative) {
        (0, 0) => 1. - x * x * (3. - 2. * x),
        (0, _) => x * (x - 1.) * (x - 1.),
        (_, 0) => x * x * (3. - 2. * x),
        (_, _) => x * x * (x - 1.),
    }
}
/// Derivative of [`psi`] with respect to `x`
pub fn dpsi(node: usize, derivative: usize, x: f64) -> f64 {
    match (node, derivative) {
        (0, 0) => 6. * x * (x - 1.),
        (0, _) => (3. * x - 1.) * (x - 1.),
        (_, 0) => 6. * x * (1. - x),
        (_, _) => x * (3. * x - 2.),
    }
}

#[inline]
fn bits(i: usize) -> [usize; 3] {
    [i & 1, (i >> 1) & 1, (i >> 2) & 1]
}

/// Tricubic Hermite element basis
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TricubicHermiteBasis;

impl TricubicHermiteBasis {
    /// Gets the basis dimension
    pub fn dimension(&self) -> usize {
        3
    }
    /// Gets the number of basis functions
    pub fn number_of_functions(&self) -> usize {
        FUNCTIONS_COUNT
    }
    /// Returns the local node and the derivative slot of a 0-based function index
    pub fn function_node_slot(&self, function: usize) -> (usize, usize) {
        (function / SLOTS_COUNT, function % SLOTS_COUNT)
    }
    /// Evaluates all the basis functions at the element coordinates `xi`
    pub fn evaluate(&self, xi: &Point3<f64>) -> [f64; FUNCTIONS_COUNT] {
        let mut values = [0f64; FUNCTIONS_COUNT];
        for (f, value) in values.iter_mut().enumerate() {
            let (n, k) = self.function_node_slot(f);
            let (node, derivative) = (bits(n), bits(k));
            *value = (0..3)
                .map(|i| psi(node[i], derivative[i], xi[i]))
                .product();
        }
        values
    }
    /// Evaluates the gradients, with respect to `xi`, of all the basis functions
    pub fn evaluate_derivatives(&self, xi: &Point3<f64>) -> [Vector3<f64>; FUNCTIONS_COUNT] {
        let mut gradients = [Vector3::zeros(); FUNCTIONS_COUNT];
        for (f, gradient) in gradients.iter_mut().enumerate() {
            let (n, k) = self.function_node_slot(f);
            let (node, derivative) = (bits(n), bits(k));
            let p = [0, 1, 2].map(|i| psi(node[i], derivative[i], xi[i]));
            let dp = [0, 1, 2].map(|i| dpsi(node[i], derivative[i], xi[i]));
            *gradient = Vector3::new(
                dp[0] * p[1] * p[2],
                p[0] * dp[1] * p[2],
                p[0] * p[1] * dp[2],
            );
        }
        gradients
    }
}

/// Element coordinates of a local node
pub fn node_xi(local_node: usize) -> Point3<f64> {
    let [i, j, k] = bits(local_node);
    Point3::new(i as f64, j as f64, k as f64)
}
