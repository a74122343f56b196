/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

/// Read-only view of a kernel table, indexed by anchor and order.
///
/// Storage is column-major: all anchors for order 0, then all anchors for order 1,
/// and so on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableRef<'a> {
    data: &'a [f64],
    num_anchors: usize,
    num_orders: usize,
}

/// An owned copy of a `TableRef`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    data: Vec<f64>,
    num_anchors: usize,
    num_orders: usize,
}

impl<'a> TableRef<'a> {
    pub(crate) fn new(data: &'a [f64], num_anchors: usize, num_orders: usize) -> Self {
        assert_eq!(data.len(), num_anchors * num_orders);
        TableRef { data, num_anchors, num_orders }
    }

    pub fn num_anchors(&self) -> usize { self.num_anchors }
    pub fn num_orders(&self) -> usize { self.num_orders }

    pub fn get(&self, anchor: usize, order: usize) -> f64 {
        assert!(anchor < self.num_anchors, "anchor {} out of range ({})", anchor, self.num_anchors);
        assert!(order < self.num_orders, "order {} out of range ({})", order, self.num_orders);
        self.data[order * self.num_anchors + anchor]
    }

    /// One order, for every anchor.
    pub fn column(&self, order: usize) -> &'a [f64] {
        assert!(order < self.num_orders, "order {} out of range ({})", order, self.num_orders);
        &self.data[order * self.num_anchors..(order + 1) * self.num_anchors]
    }

    /// Every order, for one anchor.
    pub fn row(&self, anchor: usize) -> impl ExactSizeIterator<Item = f64> + 'a {
        assert!(anchor < self.num_anchors, "anchor {} out of range ({})", anchor, self.num_anchors);
        let TableRef { data, num_anchors, num_orders } = *self;
        (0..num_orders).map(move |order| data[order * num_anchors + anchor])
    }

    pub fn as_column_major(&self) -> &'a [f64] { self.data }

    /// Rows of anchors, each with one entry per order.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (0..self.num_anchors).map(|anchor| self.row(anchor).collect()).collect()
    }

    pub fn to_table(&self) -> Table {
        Table {
            data: self.data.to_vec(),
            num_anchors: self.num_anchors,
            num_orders: self.num_orders,
        }
    }
}

impl Table {
    pub fn as_ref(&self) -> TableRef<'_> {
        TableRef::new(&self.data, self.num_anchors, self.num_orders)
    }

    pub fn num_anchors(&self) -> usize { self.num_anchors }
    pub fn num_orders(&self) -> usize { self.num_orders }
    pub fn get(&self, anchor: usize, order: usize) -> f64 { self.as_ref().get(anchor, order) }
}
