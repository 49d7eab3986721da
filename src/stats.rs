//! Rolling gauge history for the sparklines in the gauge panel.

/// Ring buffer that stores the last N samples of a metric.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: vec![0.0; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Return samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.len < self.capacity {
            0
        } else {
            self.head
        };
        (0..self.len).map(move |i| self.data[(start + i) % self.capacity])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            let idx = (self.head + self.capacity - 1) % self.capacity;
            Some(self.data[idx])
        }
    }
}

/// One sample per gauge tick.
pub struct GaugeHistory {
    pub food_stock: RingBuffer,
    pub happiness: RingBuffer,
}

impl GaugeHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            food_stock: RingBuffer::new(capacity),
            happiness: RingBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, food_stock: f32, happiness: f32) {
        self.food_stock.push(food_stock);
        self.happiness.push(happiness);
    }
}
