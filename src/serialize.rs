//! Persisted artifact codec (spec.md §6.1).
//!
//! A small, explicit binary format rather than `serde`+`bincode`: the
//! artifact's exact stream order *is* the interoperability contract
//! (§6.1 enumerates it item by item), so a generic derive would hide
//! that contract behind a macro instead of expressing it directly.
//! Little-endian throughout. Every integer vector is
//! `[width: u8][len: u64][packed words...]`; every bitvector is
//! `[len: u64][words: u64...]` (rank/select headers are not persisted —
//! `build_index`/`from_packed_words` recompute them on load).
//!
//! Only requires `std` for `Read`/`Write`; construction and query logic
//! stay `no_std`-clean.

extern crate alloc;

use std::io::{self, Read, Write};
use std::vec::Vec;

use crate::alphabet::Alphabet;
use crate::bitvec::BitVector;
use crate::error::{Result, SriError};
use crate::phi::{SampleTables, Sampling, Validity};
use crate::rlbwt::Rlbwt;
use crate::wavelet::WaveletMatrix;

/// Which Φ variant an artifact was built for — persisted as a single
/// tag byte at the front of the stream so `load` knows which trailing
/// sections (item 8 or 9 of §6.1) to expect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum VariantTag {
    Plain = 0,
    ValidMark = 1,
    ValidArea = 2,
}

impl VariantTag {
    fn from_byte(b: u8) -> Result<Self> {
        match b {
            0 => Ok(Self::Plain),
            1 => Ok(Self::ValidMark),
            2 => Ok(Self::ValidArea),
            other => Err(SriError::ArtifactCorrupt(alloc::format!(
                "unknown variant tag {other}"
            ))),
        }
    }
}

fn write_u64<W: Write>(w: &mut W, v: u64) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn write_u8<W: Write>(w: &mut W, v: u8) -> io::Result<()> {
    w.write_all(&[v])
}

fn read_u8<R: Read>(r: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// `[width: u8][len: u64][packed words...]`. `width` records the bit
/// width the values were generated at (`⌈log2(max+1)⌉`, minimum 1) —
/// advisory only, since every value is round-tripped as a full `u64`
/// word; kept so the on-disk layout matches §6.1's literal description.
fn write_int_vec<W: Write>(w: &mut W, values: &[usize], width: u8) -> io::Result<()> {
    write_u8(w, width)?;
    write_u64(w, values.len() as u64)?;
    for &v in values {
        write_u64(w, v as u64)?;
    }
    Ok(())
}

fn read_int_vec<R: Read>(r: &mut R) -> io::Result<Vec<usize>> {
    let _width = read_u8(r)?;
    let len = read_u64(r)? as usize;
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(read_u64(r)? as usize);
    }
    Ok(values)
}

fn bit_width(max_value: usize) -> u8 {
    (usize::BITS - max_value.leading_zeros()).max(1) as u8
}

fn write_bitvector<W: Write>(w: &mut W, bv: &BitVector) -> io::Result<()> {
    write_u64(w, bv.len() as u64)?;
    let words = bv.to_packed_words();
    write_u64(w, words.len() as u64)?;
    for word in words {
        write_u64(w, word)?;
    }
    Ok(())
}

fn read_bitvector<R: Read>(r: &mut R) -> io::Result<BitVector> {
    let len = read_u64(r)? as usize;
    let num_words = read_u64(r)? as usize;
    let mut words = Vec::with_capacity(num_words);
    for _ in 0..num_words {
        words.push(read_u64(r)?);
    }
    Ok(BitVector::from_packed_words(len, &words))
}

fn write_byte_vec<W: Write>(w: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_u64(w, bytes.len() as u64)?;
    w.write_all(bytes)
}

fn read_byte_vec<R: Read>(r: &mut R) -> io::Result<Vec<u8>> {
    let len = read_u64(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

fn write_alphabet<W: Write>(w: &mut W, alphabet: &Alphabet) -> io::Result<()> {
    write_byte_vec(w, alphabet.comp2char_table())?;
    write_int_vec(w, alphabet.c_table(), bit_width(*alphabet.c_table().last().unwrap_or(&0)))
}

fn read_alphabet<R: Read>(r: &mut R) -> io::Result<Alphabet> {
    let comp2char = read_byte_vec(r)?;
    let c_table = read_int_vec(r)?;
    Ok(Alphabet::from_parts(comp2char, c_table))
}

fn write_rlbwt<W: Write>(w: &mut W, rlbwt: &Rlbwt) -> io::Result<()> {
    write_u64(w, rlbwt.block_size() as u64)?;
    write_u64(w, rlbwt.len() as u64)?;
    write_u64(w, rlbwt.num_runs() as u64)?;
    write_byte_vec(w, &rlbwt.run_heads_symbols())?;
    write_bitvector(w, rlbwt.run_starts_bits())?;
    let per_symbol = rlbwt.per_symbol_run_ends_bits();
    write_u64(w, per_symbol.len() as u64)?;
    for bv in per_symbol {
        write_bitvector(w, bv)?;
    }
    Ok(())
}

fn read_rlbwt<R: Read>(r: &mut R) -> io::Result<Rlbwt> {
    let block_size = read_u64(r)? as usize;
    let n = read_u64(r)? as usize;
    let expected_r = read_u64(r)? as usize;
    let run_head_seq = read_byte_vec(r)?;
    let run_starts = read_bitvector(r)?;
    let sigma = read_u64(r)? as usize;
    let mut per_symbol_run_ends = Vec::with_capacity(sigma);
    for _ in 0..sigma {
        per_symbol_run_ends.push(read_bitvector(r)?);
    }
    let run_heads = WaveletMatrix::build(&run_head_seq);
    let r_actual = run_head_seq.len();
    if r_actual != expected_r {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "RLBWT run count mismatch",
        ));
    }
    Ok(Rlbwt::from_parts(
        run_heads,
        run_starts,
        per_symbol_run_ends,
        block_size,
        n,
        r_actual,
    ))
}

fn write_sample_tables<W: Write>(w: &mut W, tables: &SampleTables) -> io::Result<()> {
    write_u64(w, tables.rate as u64)?;
    write_bitvector(w, &tables.subsample_idx)?;
    write_int_vec(w, &tables.samples, bit_width(*tables.samples.iter().max().unwrap_or(&0)))?;
    write_bitvector(w, &tables.marks)?;
    write_int_vec(
        w,
        &tables.mark_to_sample,
        bit_width(*tables.mark_to_sample.iter().max().unwrap_or(&0)),
    )
}

fn read_sample_tables<R: Read>(r: &mut R) -> io::Result<SampleTables> {
    let rate = read_u64(r)? as usize;
    let subsample_idx = read_bitvector(r)?;
    let samples = read_int_vec(r)?;
    let marks = read_bitvector(r)?;
    let mark_to_sample = read_int_vec(r)?;
    Ok(SampleTables {
        rate,
        subsample_idx,
        samples,
        marks,
        mark_to_sample,
    })
}

/// Write a complete index artifact: alphabet, RLBWT, sampling tables,
/// and whichever trailing validity section the variant requires.
///
/// The text length is not stored separately — `Index::load` recovers
/// it as `rlbwt.len() - 1` (the BWT always includes the sentinel).
pub fn write_index<W: Write>(w: &mut W, alphabet: &Alphabet, rlbwt: &Rlbwt, sampling: &Sampling) -> Result<()> {
    let tag = match &sampling.validity {
        Validity::Plain => VariantTag::Plain,
        Validity::ValidMark(_) => VariantTag::ValidMark,
        Validity::ValidArea(_) => VariantTag::ValidArea,
    };
    write_u8(w, tag as u8)?;
    write_alphabet(w, alphabet)?;
    write_rlbwt(w, rlbwt)?;
    write_sample_tables(w, &sampling.tables)?;

    match &sampling.validity {
        Validity::Plain => {}
        Validity::ValidMark(valid) => write_bitvector(w, valid)?,
        Validity::ValidArea(areas) => {
            write_int_vec(w, areas, bit_width(*areas.iter().max().unwrap_or(&0)))?;
        }
    }
    Ok(())
}

/// Read back an artifact written by [`write_index`].
pub fn read_index<R: Read>(r: &mut R) -> Result<(Alphabet, Rlbwt, Sampling)> {
    let tag = VariantTag::from_byte(read_u8(r)?)?;
    let alphabet = read_alphabet(r)?;
    let rlbwt = read_rlbwt(r)?;
    let tables = read_sample_tables(r)?;

    let r_prime = tables.samples.len();
    let validity = match tag {
        VariantTag::Plain => Validity::Plain,
        VariantTag::ValidMark => {
            let valid = read_bitvector(r)?;
            if valid.len() != r_prime {
                return Err(SriError::ArtifactCorrupt(alloc::format!(
                    "valid-mark bitvector length {} does not match r'={}",
                    valid.len(),
                    r_prime
                )));
            }
            Validity::ValidMark(valid)
        }
        VariantTag::ValidArea => {
            let areas = read_int_vec(r)?;
            if areas.len() != r_prime {
                return Err(SriError::ArtifactCorrupt(alloc::format!(
                    "valid-area array length {} does not match r'={}",
                    areas.len(),
                    r_prime
                )));
            }
            Validity::ValidArea(areas)
        }
    };

    Ok((alphabet, rlbwt, Sampling { tables, validity }))
}
