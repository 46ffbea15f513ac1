use bytemuck::Pod;

use super::format::{BufferAccess, BufferFormat};

/// Backend-owned block of memory described by a `BufferFormat`.
///
/// Non-static buffers expose a persistent host mapping. Dropping the value
/// releases the backend handle.
pub trait Buffer {
    fn id(&self) -> u32;

    fn format(&self) -> &BufferFormat;

    fn access(&self) -> BufferAccess;

    fn size_in_bytes(&self) -> usize;

    /// Host view of the buffer; `None` for static buffers.
    fn mapped(&self) -> Option<&[u8]>;

    fn mapped_mut(&mut self) -> Option<&mut [u8]>;
}

/// Typed element access.
///
/// Bounds and access-mode violations are caller bugs and panic.
impl<'a> dyn Buffer + 'a {
    /// Number of `T` elements that fit in the buffer. `T` must not be zero-sized.
    pub fn len<T: Pod>(&self) -> usize {
        assert!(size_of::<T>() > 0, "buffer {} element type is zero-sized", self.id());
        self.size_in_bytes() / size_of::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.size_in_bytes() == 0
    }

    /// Number of elements of the buffer's own format.
    pub fn count(&self) -> usize {
        match self.format().stride() {
            0 => 0,
            stride => self.size_in_bytes() / stride,
        }
    }

    pub fn read_elements<T: Pod>(&self, offset: usize, count: usize) -> Vec<T> {
        assert!(
            self.access().is_readable(),
            "buffer {} is not readable ({:?})",
            self.id(),
            self.access()
        );
        let range = self.element_range::<T>(offset, count);
        let Some(bytes) = self.mapped() else {
            panic!("buffer {} is not mapped", self.id());
        };

        bytes[range]
            .chunks_exact(size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    pub fn write_elements<T: Pod>(&mut self, offset: usize, data: &[T]) {
        assert!(
            self.access().is_writable(),
            "buffer {} is not writable ({:?})",
            self.id(),
            self.access()
        );
        let range = self.element_range::<T>(offset, data.len());
        let id = self.id();
        let Some(bytes) = self.mapped_mut() else {
            panic!("buffer {id} is not mapped");
        };

        bytes[range].copy_from_slice(bytemuck::cast_slice(data));
    }

    pub fn get<T: Pod>(&self, index: usize) -> T {
        self.read_elements::<T>(index, 1)[0]
    }

    pub fn set<T: Pod>(&mut self, index: usize, value: T) {
        self.write_elements(index, std::slice::from_ref(&value));
    }

    fn element_range<T: Pod>(&self, offset: usize, count: usize) -> std::ops::Range<usize> {
        let len = self.len::<T>();
        assert!(
            offset.checked_add(count).is_some_and(|end| end <= len),
            "buffer {} access out of bounds: offset {offset} + count {count} > {len} elements",
            self.id()
        );
        let size = size_of::<T>();
        offset * size..(offset + count) * size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::format::{AttributeType, BufferAttribute};

    struct VecBuffer {
        format: BufferFormat,
        access: BufferAccess,
        bytes: Vec<u8>,
    }

    impl Buffer for VecBuffer {
        fn id(&self) -> u32 {
            1
        }
        fn format(&self) -> &BufferFormat {
            &self.format
        }
        fn access(&self) -> BufferAccess {
            self.access
        }
        fn size_in_bytes(&self) -> usize {
            self.bytes.len()
        }
        fn mapped(&self) -> Option<&[u8]> {
            self.access.is_mapped().then_some(self.bytes.as_slice())
        }
        fn mapped_mut(&mut self) -> Option<&mut [u8]> {
            self.access.is_mapped().then_some(self.bytes.as_mut_slice())
        }
    }

    fn buffer(access: BufferAccess, data: &[f32]) -> Box<dyn Buffer> {
        Box::new(VecBuffer {
            format: BufferFormat::new([BufferAttribute::new(AttributeType::Position2d, "p")]),
            access,
            bytes: bytemuck::cast_slice(data).to_vec(),
        })
    }

    // ── counts ───────────────────────────────────────────────────────────

    #[test]
    fn count_uses_format_stride() {
        let b = buffer(BufferAccess::Static, &[0.0; 6]);
        assert_eq!(b.count(), 3);
        assert_eq!(b.len::<f32>(), 6);
        assert_eq!(b.len::<[f32; 2]>(), 3);
    }

    #[test]
    #[should_panic(expected = "zero-sized")]
    fn zero_sized_elements_panic() {
        let b = buffer(BufferAccess::ReadWrite, &[0.0; 2]);
        b.len::<()>();
    }

    // ── element access ───────────────────────────────────────────────────

    #[test]
    fn read_and_write_elements() {
        let mut b = buffer(BufferAccess::ReadWrite, &[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(b.read_elements::<f32>(1, 2), vec![2.0, 3.0]);

        b.write_elements::<f32>(2, &[7.0, 8.0]);
        assert_eq!(b.read_elements::<f32>(0, 4), vec![1.0, 2.0, 7.0, 8.0]);

        b.set::<f32>(0, 9.0);
        assert_eq!(b.get::<f32>(0), 9.0);
    }

    #[test]
    fn reading_up_to_the_end_is_allowed() {
        let b = buffer(BufferAccess::ReadOnly, &[1.0, 2.0]);
        assert_eq!(b.read_elements::<f32>(2, 0), Vec::<f32>::new());
        assert_eq!(b.read_elements::<[f32; 2]>(0, 1), vec![[1.0, 2.0]]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn read_past_end_panics() {
        let b = buffer(BufferAccess::ReadOnly, &[1.0, 2.0]);
        let _ = b.read_elements::<f32>(1, 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn write_past_end_panics() {
        let mut b = buffer(BufferAccess::WriteOnly, &[1.0, 2.0]);
        b.write_elements::<f32>(2, &[1.0]);
    }

    #[test]
    #[should_panic(expected = "not writable")]
    fn write_to_read_only_panics() {
        let mut b = buffer(BufferAccess::ReadOnly, &[1.0]);
        b.set::<f32>(0, 2.0);
    }

    #[test]
    #[should_panic(expected = "not readable")]
    fn read_from_static_panics() {
        let b = buffer(BufferAccess::Static, &[1.0]);
        let _ = b.get::<f32>(0);
    }
}
