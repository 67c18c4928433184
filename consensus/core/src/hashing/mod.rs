use kasforge_hashes::HasherBase;

pub mod sighash;
pub mod sighash_type;
pub mod tx;

/// Little-endian integer and length-prefixed writers shared by every transaction hashing routine.
pub trait HasherExtensions {
    /// Writes the len as u64 little endian bytes
    fn write_len(&mut self, len: usize) -> &mut Self;

    /// Writes the boolean as a u8
    fn write_bool(&mut self, element: bool) -> &mut Self;

    fn write_u8(&mut self, element: u8) -> &mut Self;

    fn write_u16(&mut self, element: u16) -> &mut Self;

    fn write_u32(&mut self, element: u32) -> &mut Self;

    fn write_u64(&mut self, element: u64) -> &mut Self;

    /// Writes the number of bytes followed by the bytes themselves
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self;
}

impl<T: HasherBase> HasherExtensions for T {
    #[inline(always)]
    fn write_len(&mut self, len: usize) -> &mut Self {
        self.update((len as u64).to_le_bytes())
    }

    #[inline(always)]
    fn write_bool(&mut self, element: bool) -> &mut Self {
        self.update(if element { [1u8] } else { [0u8] })
    }

    #[inline(always)]
    fn write_u8(&mut self, element: u8) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u16(&mut self, element: u16) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u32(&mut self, element: u32) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u64(&mut self, element: u64) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_len(bytes.len()).update(bytes)
    }
}

/// A `HasherBase` that records everything written to it, used to expose raw preimages.
#[derive(Default, Clone, Debug)]
pub struct PreimageHasher {
    buff: Vec<u8>,
}

impl PreimageHasher {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buff: Vec::with_capacity(capacity) }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buff
    }
}

impl HasherBase for PreimageHasher {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        self.buff.extend_from_slice(data.as_ref());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_encodings() {
        let mut hasher = PreimageHasher::default();
        hasher.write_u16(0x0102).write_u32(7).write_bool(true).write_var_bytes(&[0xaa, 0xbb]).write_u8(9);
        assert_eq!(hasher.into_bytes(), vec![0x02, 0x01, 7, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0, 0, 0, 0xaa, 0xbb, 9]);

        let mut hasher = PreimageHasher::with_capacity(8);
        hasher.write_len(0).write_var_bytes(&[]);
        assert_eq!(hasher.into_bytes(), vec![0u8; 16]);
    }
}
