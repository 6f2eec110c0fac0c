mod test_push;
