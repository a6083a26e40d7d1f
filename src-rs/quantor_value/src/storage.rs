use crate::{Element, ValueError};

/// How the elements of a vector or matrix are stored.
///
/// Storage never changes the values. Sparse storage only keeps non-zero
/// elements, which saves memory when most elements are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageType {
    /// Every element in one contiguous array
    #[default]
    Dense,
    /// The indices and values of the non-zero elements
    Sparse,
}

/// The SI values of a vector, or of a matrix in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub enum Store<N> {
    Dense(Vec<N>),
    Sparse {
        len: usize,
        indices: Vec<usize>,
        values: Vec<N>,
    },
}

impl<N: Element> Store<N> {
    pub fn new(values: Vec<N>, storage: StorageType) -> Self {
        let store = Self::Dense(values);
        match storage {
            StorageType::Dense => store,
            StorageType::Sparse => store.into_sparse(),
        }
    }

    /// Builds sparse storage from `(index, value)` pairs.
    ///
    /// When an index appears more than once, the last value wins. Zero values
    /// are dropped.
    pub fn from_entries(
        len: usize,
        entries: impl IntoIterator<Item = (usize, N)>,
    ) -> Result<Self, ValueError> {
        let mut entries = entries
            .into_iter()
            .map(|(index, value)| {
                if index < len {
                    Ok((index, value))
                } else {
                    Err(ValueError::IndexOutOfBounds { index, len })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|(index, _value)| *index);

        let mut indices: Vec<usize> = Vec::with_capacity(entries.len());
        let mut values: Vec<N> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            if indices.last() == Some(&index) {
                if let Some(slot) = values.last_mut() {
                    *slot = value;
                }
            } else {
                indices.push(index);
                values.push(value);
            }
        }

        let (indices, values) = indices
            .into_iter()
            .zip(values)
            .filter(|(_index, value)| !value.is_zero())
            .unzip();
        Ok(Self::Sparse {
            len,
            indices,
            values,
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Dense(values) => values.len(),
            Self::Sparse { len, .. } => *len,
        }
    }

    pub const fn storage_type(&self) -> StorageType {
        match self {
            Self::Dense(_) => StorageType::Dense,
            Self::Sparse { .. } => StorageType::Sparse,
        }
    }

    pub fn get(&self, index: usize) -> Option<N> {
        match self {
            Self::Dense(values) => values.get(index).copied(),
            Self::Sparse {
                len,
                indices,
                values,
            } => (index < *len).then(|| {
                indices
                    .binary_search(&index)
                    .ok()
                    .and_then(|position| values.get(position).copied())
                    .unwrap_or_else(N::zero)
            }),
        }
    }

    pub fn set(&mut self, index: usize, value: N) -> Result<(), ValueError> {
        let len = self.len();
        if index >= len {
            return Err(ValueError::IndexOutOfBounds { index, len });
        }

        match self {
            Self::Dense(values) => {
                if let Some(slot) = values.get_mut(index) {
                    *slot = value;
                }
            }
            Self::Sparse {
                indices, values, ..
            } => match indices.binary_search(&index) {
                Ok(position) if value.is_zero() => {
                    indices.remove(position);
                    values.remove(position);
                }
                Ok(position) => {
                    if let Some(slot) = values.get_mut(position) {
                        *slot = value;
                    }
                }
                Err(_) if value.is_zero() => {}
                Err(position) => {
                    indices.insert(position, index);
                    values.insert(position, value);
                }
            },
        }
        Ok(())
    }

    /// Returns every element, zeros included.
    pub fn to_vec(&self) -> Vec<N> {
        match self {
            Self::Dense(values) => values.clone(),
            Self::Sparse {
                len,
                indices,
                values,
            } => {
                let mut dense = vec![N::zero(); *len];
                for (&index, &value) in indices.iter().zip(values) {
                    if let Some(slot) = dense.get_mut(index) {
                        *slot = value;
                    }
                }
                dense
            }
        }
    }

    pub fn into_dense(self) -> Self {
        match self {
            Self::Dense(_) => self,
            Self::Sparse { .. } => Self::Dense(self.to_vec()),
        }
    }

    pub fn into_sparse(self) -> Self {
        match self {
            Self::Sparse { .. } => self,
            Self::Dense(values) => {
                let len = values.len();
                let (indices, values) = values
                    .into_iter()
                    .enumerate()
                    .filter(|(_index, value)| !value.is_zero())
                    .unzip();
                Self::Sparse {
                    len,
                    indices,
                    values,
                }
            }
        }
    }

    /// Applies `f` to every element.
    ///
    /// Sparse storage stays sparse when `f` maps zero to zero.
    pub fn map(&self, f: impl Fn(N) -> N) -> Self {
        match self {
            Self::Sparse {
                len,
                indices,
                values,
            } if f(N::zero()).is_zero() => {
                let (indices, values) = indices
                    .iter()
                    .zip(values)
                    .map(|(&index, &value)| (index, f(value)))
                    .filter(|(_index, value)| !value.is_zero())
                    .unzip();
                Self::Sparse {
                    len: *len,
                    indices,
                    values,
                }
            }
            Self::Dense(_) | Self::Sparse { .. } => {
                Self::Dense(self.to_vec().into_iter().map(f).collect())
            }
        }
    }

    /// Combines two stores of equal length element by element.
    ///
    /// The result is sparse only when both stores are sparse and `f` maps two
    /// zeros to zero, so that the elements missing from both stay zero.
    pub fn zip_with(&self, other: &Self, f: impl Fn(N, N) -> N) -> Self {
        match (self, other) {
            (
                Self::Sparse {
                    len,
                    indices: lhs_indices,
                    values: lhs_values,
                },
                Self::Sparse {
                    indices: rhs_indices,
                    values: rhs_values,
                    ..
                },
            ) if f(N::zero(), N::zero()).is_zero() => {
                let mut indices = Vec::with_capacity(lhs_indices.len() + rhs_indices.len());
                let mut values = Vec::with_capacity(indices.capacity());
                let mut lhs = lhs_indices.iter().zip(lhs_values).peekable();
                let mut rhs = rhs_indices.iter().zip(rhs_values).peekable();

                loop {
                    let (index, value) = match (lhs.peek(), rhs.peek()) {
                        (None, None) => break,
                        (Some(&(&index, &value)), None) => {
                            lhs.next();
                            (index, f(value, N::zero()))
                        }
                        (None, Some(&(&index, &value))) => {
                            rhs.next();
                            (index, f(N::zero(), value))
                        }
                        (Some(&(&lhs_index, &lhs_value)), Some(&(&rhs_index, &rhs_value))) => {
                            if lhs_index < rhs_index {
                                lhs.next();
                                (lhs_index, f(lhs_value, N::zero()))
                            } else if rhs_index < lhs_index {
                                rhs.next();
                                (rhs_index, f(N::zero(), rhs_value))
                            } else {
                                lhs.next();
                                rhs.next();
                                (lhs_index, f(lhs_value, rhs_value))
                            }
                        }
                    };
                    if !value.is_zero() {
                        indices.push(index);
                        values.push(value);
                    }
                }

                Self::Sparse {
                    len: *len,
                    indices,
                    values,
                }
            }
            (Self::Dense(_) | Self::Sparse { .. }, Self::Dense(_) | Self::Sparse { .. }) => {
                Self::Dense(
                    self.to_vec()
                        .into_iter()
                        .zip(other.to_vec())
                        .map(|(lhs, rhs)| f(lhs, rhs))
                        .collect(),
                )
            }
        }
    }

    /// Counts the non-zero elements.
    pub fn cardinality(&self) -> usize {
        let values = match self {
            Self::Dense(values) | Self::Sparse { values, .. } => values,
        };
        values.iter().filter(|value| !value.is_zero()).count()
    }

    pub fn sum(&self) -> N {
        let values = match self {
            Self::Dense(values) | Self::Sparse { values, .. } => values,
        };
        values.iter().fold(N::zero(), |sum, &value| sum + value)
    }
}
