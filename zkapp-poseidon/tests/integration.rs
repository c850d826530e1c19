//! Native / in-circuit equivalence for the sponge and input packing.

use ff::Field;
use pasta_curves::Fp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zkapp_poseidon::gadget::{self, HashInputVar, SpongeVar};
use zkapp_poseidon::native::{permute, Sponge};
use zkapp_poseidon::{hash, prefixes, HashInput};
use zkapp_synth::drivers::{CountingDriver, ProvingDriver};
use zkapp_synth::{Always, Maybe, WireValue};

type Dr = ProvingDriver<Fp>;

fn alloc_all(dr: &mut Dr, xs: &[Fp]) -> Vec<WireValue<Dr>> {
    xs.iter()
        .map(|x| WireValue::alloc(dr, Always(*x)).unwrap())
        .collect()
}

#[test]
fn permutation_matches_native() {
    let mut rng = StdRng::seed_from_u64(1);
    let state = [
        Fp::random(&mut rng),
        Fp::random(&mut rng),
        Fp::random(&mut rng),
    ];

    let mut dr = Dr::new();
    let vars = alloc_all(&mut dr, &state);
    let out = gadget::permute(&mut dr, [vars[0].clone(), vars[1].clone(), vars[2].clone()]).unwrap();

    let mut expected = state;
    permute(&mut expected);
    for (got, want) in out.iter().zip(expected) {
        assert_eq!(*got.value.snag(), want);
        assert_eq!(dr.get_witness(got.wire), want);
    }
    assert!(dr.check_constraints().is_ok());
}

#[test]
fn hash_matches_native_for_every_block_shape() {
    let mut rng = StdRng::seed_from_u64(2);
    for len in 0..6 {
        let xs: Vec<Fp> = (0..len).map(|_| Fp::random(&mut rng)).collect();

        let mut dr = Dr::new();
        let vars = alloc_all(&mut dr, &xs);
        let digest = gadget::hash(&mut dr, prefixes::ZKAPP_EVENT, &vars).unwrap();

        assert_eq!(
            dr.get_witness(digest.wire),
            hash(prefixes::ZKAPP_EVENT, &xs),
            "length {len}"
        );
        assert!(dr.is_satisfied());
    }
}

#[test]
fn incremental_absorb_matches_native() {
    let xs = [Fp::from(10), Fp::from(20), Fp::from(30)];

    let mut native = Sponge::for_prefix(prefixes::ZKAPP_EVENTS);
    native.absorb(&xs[..1]);
    native.absorb(&xs[1..]);

    let mut dr = Dr::new();
    let vars = alloc_all(&mut dr, &xs);
    let mut sponge = SpongeVar::for_prefix(&mut dr, prefixes::ZKAPP_EVENTS).unwrap();
    sponge.absorb(&mut dr, &vars[..1]).unwrap();
    sponge.absorb(&mut dr, &vars[1..]).unwrap();

    assert_eq!(*sponge.digest().value.snag(), native.digest());
}

#[test]
fn packing_matches_native() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..8 {
        let fields: Vec<Fp> = (0..rng.gen_range(0..4)).map(|_| Fp::random(&mut rng)).collect();
        let chunks: Vec<(u64, u32)> = (0..rng.gen_range(0..20))
            .map(|_| {
                if rng.gen_bool(0.5) {
                    (u64::from(rng.gen::<u32>()), 32)
                } else {
                    (u64::from(rng.gen::<bool>()), 1)
                }
            })
            .collect();

        let native: HashInput = std::iter::once(HashInput::fields(&fields))
            .chain(chunks.iter().map(|(v, n)| HashInput::packed(Fp::from(*v), *n)))
            .collect();

        let mut dr = Dr::new();
        let field_vars = alloc_all(&mut dr, &fields);
        let mut var = HashInputVar::fields(&field_vars);
        for (v, n) in &chunks {
            let w = WireValue::alloc(&mut dr, Always(Fp::from(*v))).unwrap();
            var = var.append(HashInputVar::packed(w, *n));
        }

        let packed: Vec<Fp> = var
            .pack_to_fields(&mut dr)
            .unwrap()
            .iter()
            .map(|w| dr.get_witness(w.wire))
            .collect();
        assert_eq!(packed, native.pack_to_fields());
        assert!(dr.is_satisfied());
    }
}

#[test]
fn tampered_digest_is_unsatisfied() {
    let xs = [Fp::from(1), Fp::from(2)];
    let mut dr = Dr::new();
    let vars = alloc_all(&mut dr, &xs);
    let digest = gadget::hash(&mut dr, prefixes::ZKAPP_URI, &vars).unwrap();

    let claimed = WireValue::alloc(&mut dr, Always(hash(prefixes::ZKAPP_URI, &xs) + Fp::ONE)).unwrap();
    WireValue::enforce_equal(&mut dr, &digest, &claimed).unwrap();
    assert!(!dr.is_satisfied());
}

#[test]
fn permutation_matches_library_hash() {
    use poseidon_primitives::poseidon::primitives::{ConstantLength, Hash as PoseidonHash};
    use zkapp_poseidon::params::{length_domain, ZkappPoseidonSpec, RATE, WIDTH};

    let mut rng = StdRng::seed_from_u64(4);
    let (a, b) = (Fp::random(&mut rng), Fp::random(&mut rng));
    let expected =
        PoseidonHash::<Fp, ZkappPoseidonSpec, ConstantLength<2>, WIDTH, RATE>::init().hash([a, b]);

    let mut dr = Dr::new();
    let vars = alloc_all(&mut dr, &[a, b, length_domain(2)]);
    let out = gadget::permute(&mut dr, [vars[0].clone(), vars[1].clone(), vars[2].clone()]).unwrap();
    assert_eq!(dr.get_witness(out[0].wire), expected);
    assert!(dr.is_satisfied());
}

#[test]
fn zero_padded_inputs_hash_apart() {
    let cases: [&[Fp]; 4] = [
        &[],
        &[Fp::ZERO],
        &[Fp::ONE],
        &[Fp::ONE, Fp::ZERO],
    ];
    let mut digests = Vec::new();
    for xs in cases {
        let mut dr = Dr::new();
        let vars = alloc_all(&mut dr, xs);
        let digest = gadget::hash(&mut dr, prefixes::ZKAPP_EVENT, &vars).unwrap();
        let native = hash(prefixes::ZKAPP_EVENT, xs);
        assert_eq!(dr.get_witness(digest.wire), native);
        assert!(!digests.contains(&native), "{xs:?}");
        digests.push(native);
    }
}

#[test]
fn zero_chunks_shift_packing_in_both_forms() {
    // Same set bits, different zero chunks around them.
    let layouts: [&[(u64, u32)]; 4] = [
        &[(1, 1)],
        &[(0, 1), (1, 1)],
        &[(0, 32), (1, 1)],
        &[(1, 1), (0, 32)],
    ];
    let mut seen = Vec::new();
    for chunks in layouts {
        let native: HashInput = chunks
            .iter()
            .map(|(v, n)| HashInput::packed(Fp::from(*v), *n))
            .collect();

        let mut dr = Dr::new();
        let var: HashInputVar<Dr> = chunks
            .iter()
            .map(|(v, n)| HashInputVar::packed(WireValue::alloc(&mut dr, Always(Fp::from(*v))).unwrap(), *n))
            .collect();
        let packed: Vec<Fp> = var
            .pack_to_fields(&mut dr)
            .unwrap()
            .iter()
            .map(|w| dr.get_witness(w.wire))
            .collect();

        assert_eq!(packed, native.pack_to_fields());
        let digest = hash(prefixes::ZKAPP_URI, &packed);
        assert!(!seen.contains(&digest), "{chunks:?}");
        seen.push(digest);
    }
}

#[test]
#[should_panic(expected = "packed chunk width")]
fn oversized_chunk_is_rejected_in_circuit() {
    let mut dr = Dr::new();
    let x = WireValue::alloc(&mut dr, Always(Fp::ONE)).unwrap();
    let _ = HashInputVar::packed(x, 255);
}

#[test]
fn permutation_circuit_size() {
    let mut dr = CountingDriver::<Fp>::new();
    let state = [
        WireValue::constant(&mut dr, Fp::ZERO).unwrap(),
        WireValue::constant(&mut dr, Fp::ZERO).unwrap(),
        WireValue::constant(&mut dr, Fp::ZERO).unwrap(),
    ];
    let before = dr.stats();
    gadget::permute(&mut dr, state).unwrap();
    let after = dr.stats();

    // 8 full rounds with three S-boxes, 56 partial rounds with one; four
    // multiplications per S-box.
    let sboxes = 8 * 3 + 56;
    assert_eq!(after.num_mul - before.num_mul, sboxes * 4);
    // Two input ties per multiplication, plus a round-constant addition and
    // an MDS row per lane per round.
    assert_eq!(
        after.num_linear - before.num_linear,
        sboxes * 4 * 2 + 64 * 3 * 2
    );
}
