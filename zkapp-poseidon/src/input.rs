//! Hash input canonicalisation.
//!
//! A [`HashInput`] collects whole field elements and short bit-packed chunks
//! separately. [`HashInput::pack_to_fields`] emits the field elements first,
//! then greedily merges consecutive packed chunks into as few field
//! elements as fit below the field size.
//!
//! Chunks merge little-endian: each chunk lands above the bits already in
//! the accumulator, at a position fixed by the widths alone. Leading zero
//! chunks therefore still move later chunks up, and `[0, 1]` packs apart
//! from `[1]`.

use ff::{Field, PrimeField};
use pasta_curves::Fp;

/// Packed chunks are merged while the running width stays below this.
pub const PACKING_LIMIT: u32 = Fp::NUM_BITS;

/// Panics unless a chunk of `bits` bits can share an accumulator.
pub(crate) fn check_packed_width(bits: u32) {
    assert!(
        bits > 0 && bits < PACKING_LIMIT,
        "packed chunk width {bits} outside 1..{PACKING_LIMIT}"
    );
}

/// `2^n` in the field.
pub fn pow2(n: u32) -> Fp {
    Fp::from(2).pow_vartime([u64::from(n)])
}

/// Field elements and bit-packed chunks awaiting canonicalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashInput {
    pub field_elements: Vec<Fp>,
    /// `(value, bit_length)`; `value` must be below `2^bit_length`.
    pub packeds: Vec<(Fp, u32)>,
}

impl HashInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(x: Fp) -> Self {
        HashInput {
            field_elements: vec![x],
            packeds: Vec::new(),
        }
    }

    pub fn fields(xs: &[Fp]) -> Self {
        HashInput {
            field_elements: xs.to_vec(),
            packeds: Vec::new(),
        }
    }

    /// # Panics
    ///
    /// If `bits` does not fit below the packing limit.
    pub fn packed(x: Fp, bits: u32) -> Self {
        check_packed_width(bits);
        HashInput {
            field_elements: Vec::new(),
            packeds: vec![(x, bits)],
        }
    }

    pub fn u32(x: u32) -> Self {
        Self::packed(Fp::from(u64::from(x)), 32)
    }

    pub fn bool(b: bool) -> Self {
        Self::packed(if b { Fp::ONE } else { Fp::ZERO }, 1)
    }

    /// One 1-bit chunk per bit.
    pub fn bits(bits: &[bool]) -> Self {
        HashInput {
            field_elements: Vec::new(),
            packeds: bits
                .iter()
                .map(|b| (if *b { Fp::ONE } else { Fp::ZERO }, 1))
                .collect(),
        }
    }

    /// Concatenate both lists.
    pub fn append(mut self, other: HashInput) -> Self {
        self.field_elements.extend(other.field_elements);
        self.packeds.extend(other.packeds);
        self
    }

    pub fn pack_to_fields(&self) -> Vec<Fp> {
        let mut out = self.field_elements.clone();
        let mut acc = Fp::ZERO;
        let mut acc_bits = 0u32;
        for (x, n) in &self.packeds {
            if acc_bits + n < PACKING_LIMIT {
                acc += x * pow2(acc_bits);
                acc_bits += n;
            } else {
                out.push(acc);
                acc = *x;
                acc_bits = *n;
            }
        }
        if acc_bits > 0 {
            out.push(acc);
        }
        out
    }
}

impl FromIterator<HashInput> for HashInput {
    fn from_iter<I: IntoIterator<Item = HashInput>>(iter: I) -> Self {
        iter.into_iter().fold(HashInput::new(), HashInput::append)
    }
}
