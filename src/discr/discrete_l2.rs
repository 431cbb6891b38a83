//! Discretized `L2` spaces: grid samples stored in an `F^n` vector.
//!
//! A [`DiscreteL2`] ties a continuous space to a sampling grid and a
//! backing [`FnSpace`] whose size equals the number of grid points. The
//! configured [`Order`] decides how multi-dimensional sample arrays are
//! flattened into the backing vector and how they are rebuilt from it.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use log::debug;
use ndarray::{ArrayView, ArrayViewMut};

use crate::core::buffer::{Buffer, by_dtype};
use crate::core::dtype::{DType, Field};
use crate::core::scalar::{Number, Scalar};
use crate::core::value::{NdArray, Order, Value};
use crate::discr::grid::RegularGrid;
use crate::discr::l2::L2;
use crate::error::{FnError, Result};
use crate::space::fn_space::{FnSpace, Vector};

#[derive(Debug, PartialEq)]
struct Inner {
    l2: L2,
    grid: RegularGrid,
    dspace: FnSpace,
    order: Order,
}

#[derive(Debug, Clone)]
pub struct DiscreteL2 {
    inner: Arc<Inner>,
}

impl PartialEq for DiscreteL2 {
    fn eq(&self, other: &DiscreteL2) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl DiscreteL2 {
    /// Row-major discretization of `l2` on `grid`, stored in `dspace`.
    pub fn new(l2: L2, grid: RegularGrid, dspace: FnSpace) -> Result<DiscreteL2> {
        DiscreteL2::with_order(l2, grid, dspace, Order::C)
    }

    /// Fails with a value error when the backing space's size differs from
    /// the number of grid points, its field differs from the function
    /// space's, or the grid does not fit the domain.
    pub fn with_order(l2: L2, grid: RegularGrid, dspace: FnSpace, order: Order) -> Result<DiscreteL2> {
        if dspace.size() != grid.ntotal() {
            return Err(FnError::Value(format!(
                "{dspace} cannot hold the {} points of {grid}",
                grid.ntotal()
            )));
        }
        if dspace.field() != l2.field() {
            return Err(FnError::Value(format!(
                "{dspace} is over {}, {l2} over {}",
                dspace.field(),
                l2.field()
            )));
        }
        if !grid.is_subset_of(l2.domain()) {
            return Err(FnError::Value(format!("{grid} does not lie in {}", l2.domain())));
        }
        debug!("discretized {l2} on a {:?} grid ({order:?} order) in {dspace}", grid.shape());
        Ok(DiscreteL2 {
            inner: Arc::new(Inner {
                l2,
                grid,
                dspace,
                order,
            }),
        })
    }

    pub fn l2(&self) -> &L2 {
        &self.inner.l2
    }

    pub fn grid(&self) -> &RegularGrid {
        &self.inner.grid
    }

    /// Backing `F^n` space.
    pub fn dspace(&self) -> &FnSpace {
        &self.inner.dspace
    }

    pub fn order(&self) -> Order {
        self.inner.order
    }

    /// Grid shape.
    pub fn shape(&self) -> &[usize] {
        self.inner.grid.shape()
    }

    pub fn size(&self) -> usize {
        self.inner.dspace.size()
    }

    pub fn field(&self) -> Field {
        self.inner.l2.field()
    }

    pub fn dtype(&self) -> DType {
        self.inner.dspace.dtype()
    }

    pub fn zero(&self) -> DiscreteVector {
        DiscreteVector {
            space: self.clone(),
            ntuple: self.dspace().zero(),
        }
    }

    pub fn empty(&self) -> DiscreteVector {
        self.zero()
    }

    /// Element from sample data.
    ///
    /// Accepts a scalar or one-element sequence (broadcast), a flat
    /// sequence of `size` values already in this space's order, or an
    /// array with exactly the grid shape, which is flattened in this
    /// space's order. Anything else is a shape error.
    pub fn element(&self, data: impl Into<Value>) -> Result<DiscreteVector> {
        let buffer = self.ingest(&data.into())?;
        Ok(DiscreteVector {
            space: self.clone(),
            ntuple: self.dspace().element_from_buffer(buffer)?,
        })
    }

    /// Wrap a vector of the backing space.
    pub fn element_from_ntuple(&self, ntuple: Vector) -> Result<DiscreteVector> {
        if ntuple.space() != self.dspace() {
            return Err(FnError::Type(format!("{} is not {}", ntuple.space(), self.dspace())));
        }
        Ok(DiscreteVector {
            space: self.clone(),
            ntuple,
        })
    }

    fn ingest(&self, value: &Value) -> Result<Buffer> {
        let (dtype, size) = (self.dtype(), self.size());
        if let Value::Number(n) = value {
            return Buffer::full(dtype, size, *n);
        }
        let dense = value.to_dense()?;
        let shape = self.shape();
        if dense.shape == [1] && size != 1 {
            Buffer::full(dtype, size, dense.values[0])
        } else if dense.shape == [size] {
            Buffer::from_numbers(dtype, &dense.values)
        } else if dense.shape == shape {
            let c_data = Buffer::from_numbers(dtype, &dense.values)?;
            Ok(NdArray::from_c_data(shape.to_vec(), self.order(), c_data)?.to_buffer())
        } else {
            Err(FnError::Shape(format!(
                "input of shape {:?} fits neither {size} points nor grid shape {shape:?}",
                dense.shape
            )))
        }
    }
}

// Typed grid view over a flat backing slice laid out in `order`.
fn grid_get<T: Scalar>(data: &[T], shape: &[usize], order: Order, index: &[usize]) -> Option<Number> {
    let view = ArrayView::from_shape(order.layout(shape), data).ok()?;
    view.get(index).map(|x| x.to_number())
}

fn grid_set<T: Scalar>(
    data: &mut [T],
    shape: &[usize],
    order: Order,
    index: &[usize],
    value: Number,
) -> Result<bool> {
    let mut view = ArrayViewMut::from_shape(order.layout(shape), data)
        .map_err(|e| FnError::Shape(e.to_string()))?;
    let Some(slot) = view.get_mut(index) else {
        return Ok(false);
    };
    *slot = T::from_number(value)
        .ok_or_else(|| FnError::Type(format!("cannot cast {value} to {}", T::DTYPE)))?;
    Ok(true)
}

impl fmt::Display for DiscreteL2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DiscreteL2({}, {:?}, {}, {:?})",
            self.l2(),
            self.shape(),
            self.dspace(),
            self.order()
        )
    }
}

/// Element of a [`DiscreteL2`] space.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteVector {
    space: DiscreteL2,
    ntuple: Vector,
}

impl DiscreteVector {
    pub fn space(&self) -> &DiscreteL2 {
        &self.space
    }

    /// Backing flat vector.
    pub fn ntuple(&self) -> &Vector {
        &self.ntuple
    }

    pub fn ntuple_mut(&mut self) -> &mut Vector {
        &mut self.ntuple
    }

    pub fn into_ntuple(self) -> Vector {
        self.ntuple
    }

    pub fn len(&self) -> usize {
        self.ntuple.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ntuple.is_empty()
    }

    pub fn dtype(&self) -> DType {
        self.ntuple.dtype()
    }

    /// Entry at flat position `index` of the backing vector.
    pub fn get(&self, index: usize) -> Result<Number> {
        self.ntuple.get(index)
    }

    pub fn set(&mut self, index: usize, value: impl Into<Number>) -> Result<()> {
        self.ntuple.set(index, value)
    }

    fn outside(&self, index: &[usize]) -> FnError {
        FnError::Shape(format!(
            "index {index:?} outside grid shape {:?}",
            self.space.shape()
        ))
    }

    /// Sample at grid multi-index `index`.
    pub fn get_nd(&self, index: &[usize]) -> Result<Number> {
        let (shape, order) = (self.space.shape(), self.space.order());
        let data = self.ntuple.data();
        let sample = by_dtype!(self.dtype(), T => {
            <T as Scalar>::view(data).and_then(|d| grid_get(d, shape, order, index))
        });
        sample.ok_or_else(|| self.outside(index))
    }

    pub fn set_nd(&mut self, index: &[usize], value: impl Into<Number>) -> Result<()> {
        let value = value.into();
        let (shape, order) = (self.space.shape().to_vec(), self.space.order());
        let written = by_dtype!(self.dtype(), T => {
            let data = self.ntuple.as_mut_slice::<T>()?;
            grid_set(data, &shape, order, index, value)?
        });
        if !written {
            return Err(self.outside(index));
        }
        Ok(())
    }

    /// Flat slice of the backing vector as a vector of a matching `F^n`.
    pub fn get_range(&self, range: Range<usize>) -> Result<Vector> {
        self.ntuple.get_range(range)
    }

    pub fn set_range(&mut self, range: Range<usize>, value: impl Into<Value>) -> Result<()> {
        self.ntuple.set_range(range, value)
    }

    /// Assign all samples (`v[:] = value`) with the same rules as
    /// [`DiscreteL2::element`]. Nothing is written on error.
    pub fn assign(&mut self, value: impl Into<Value>) -> Result<()> {
        let data = self.space.ingest(&value.into())?;
        let len = self.len();
        self.ntuple.set_range(0..len, Value::Array(NdArray::from_buffer(data)))
    }

    /// Samples as an array of the grid shape whose memory layout is this
    /// space's order. The backing buffer is reused as-is.
    pub fn asarray(&self) -> Result<NdArray> {
        NdArray::new(
            self.space.shape().to_vec(),
            self.space.order(),
            self.ntuple.data().clone(),
        )
    }

    /// Flat entries in storage order.
    pub fn to_value(&self) -> Value {
        self.ntuple.to_value()
    }
}

impl From<&DiscreteVector> for Value {
    fn from(v: &DiscreteVector) -> Value {
        v.to_value()
    }
}
