mod flattener;
