//! In-place gate kernels.
//!
//! Single-qubit gates walk the amplitude buffer in index pairs that differ
//! only in the target bit (stride 2^q), so no gate allocates or expands a
//! full 2^n x 2^n operator. Angle conventions:
//!
//! - `Rx(θ) = exp(-iθX/2) = [[cos θ/2, -i sin θ/2], [-i sin θ/2, cos θ/2]]`
//! - `Rz(θ) = exp(-iθZ/2) = diag(e^{-iθ/2}, e^{+iθ/2})`
//!
//! Applying a gate followed by its inverse (same gate with negated angle,
//! or H and CNOT themselves) restores the state to machine precision.

use crate::{CircuitError, Complex, Result, StateVector, FRAC_1_SQRT_2};

impl StateVector {
    /// Apply the Hadamard gate to `qubit`.
    pub fn apply_h(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;

        let stride = 1 << qubit;
        let dim = self.dimension();
        for base in (0..dim).step_by(stride << 1) {
            for offset in 0..stride {
                let a = base + offset;
                let b = a + stride;
                let (pa, pb) = (self.amplitudes[a], self.amplitudes[b]);
                self.amplitudes[a] = (pa + pb) * FRAC_1_SQRT_2;
                self.amplitudes[b] = (pa - pb) * FRAC_1_SQRT_2;
            }
        }
        Ok(())
    }

    /// Apply Rx(theta) to `qubit`.
    pub fn apply_rx(&mut self, theta: f64, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;

        let cos = Complex::new((theta / 2.0).cos(), 0.0);
        let misin = Complex::new(0.0, -(theta / 2.0).sin());

        let stride = 1 << qubit;
        let dim = self.dimension();
        for base in (0..dim).step_by(stride << 1) {
            for offset in 0..stride {
                let a = base + offset;
                let b = a + stride;
                let (pa, pb) = (self.amplitudes[a], self.amplitudes[b]);
                self.amplitudes[a] = cos * pa + misin * pb;
                self.amplitudes[b] = misin * pa + cos * pb;
            }
        }
        Ok(())
    }

    /// Apply Rz(theta) to `qubit`.
    pub fn apply_rz(&mut self, theta: f64, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;

        let phase0 = Complex::from_polar(1.0, -theta / 2.0);
        let phase1 = Complex::from_polar(1.0, theta / 2.0);

        for (index, amp) in self.amplitudes.iter_mut().enumerate() {
            if (index >> qubit) & 1 == 0 {
                *amp *= phase0;
            } else {
                *amp *= phase1;
            }
        }
        Ok(())
    }

    /// Apply CNOT with the given control and target qubits.
    pub fn apply_cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(CircuitError::SameQubitIndex(control, target));
        }

        let tbit = 1 << target;
        let dim = self.dimension();
        for index in 0..dim {
            // Visit each swapped pair once, from its target-0 side.
            if (index >> control) & 1 == 1 && index & tbit == 0 {
                self.amplitudes.swap(index, index | tbit);
            }
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(CircuitError::InvalidQubitIndex(qubit, self.num_qubits()));
        }
        Ok(())
    }
}
