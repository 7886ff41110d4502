mod bubble_point;
mod deviation;
