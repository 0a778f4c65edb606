use xslice_buffer::error::Result;
use xslice_buffer::{ByteRepr, View};

/// Push values one by one onto an empty view, returning the final view
/// and the distinct capacities it went through.
pub fn push_trace<T, I>(vals: I) -> Result<(View<T>, Vec<usize>)>
where
    T: ByteRepr,
    I: IntoIterator<Item = T>,
{
    let mut view = View::new();
    let mut caps = vec![];
    for v in vals {
        view.push(v)?;
        if caps.last() != Some(&view.cap()) {
            caps.push(view.cap());
        }
    }
    Ok((view, caps))
}

/// Build a view of given length and capacity filled with `0..len`.
pub fn seq_view(len: usize, cap: usize) -> Result<View<i64>> {
    let view = View::with_len_cap(len, cap)?;
    for i in 0..len {
        view.set(i, i as i64)?;
    }
    Ok(view)
}
